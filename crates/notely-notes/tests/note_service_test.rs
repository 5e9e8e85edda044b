//! Integration tests for tenant isolation, role rules and plan quotas.

use notely_core::error::NotelyError;
use notely_core::models::identity::Claims;
use notely_core::models::tenant::{CreateTenant, Plan, Tenant};
use notely_core::models::user::Role;
use notely_core::repository::TenantRepository;
use notely_db::repository::{SurrealNoteRepository, SurrealTenantRepository};
use notely_notes::{NoteInput, NoteService};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

type Service = NoteService<SurrealNoteRepository<Db>, SurrealTenantRepository<Db>>;

struct Fixture {
    svc: Service,
    tenants: SurrealTenantRepository<Db>,
    acme: Tenant,
    globex: Tenant,
}

impl Fixture {
    fn caller(&self, tenant: &Tenant, role: Role) -> Claims {
        Claims {
            user_id: Uuid::new_v4(),
            tenant_id: tenant.id,
            role,
            tenant_slug: tenant.slug.clone(),
        }
    }
}

async fn setup() -> Fixture {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    notely_db::run_migrations(&db).await.unwrap();

    let tenants = SurrealTenantRepository::new(db.clone());
    let mut created = Vec::new();
    for (name, slug) in [("Acme", "acme"), ("Globex", "globex")] {
        created.push(
            tenants
                .create(CreateTenant {
                    name: name.into(),
                    slug: slug.into(),
                })
                .await
                .unwrap(),
        );
    }
    let globex = created.pop().unwrap();
    let acme = created.pop().unwrap();

    Fixture {
        svc: NoteService::new(SurrealNoteRepository::new(db), tenants.clone()),
        tenants,
        acme,
        globex,
    }
}

fn note(title: &str) -> NoteInput {
    NoteInput::new(title, format!("{title} content"))
}

#[tokio::test]
async fn free_plan_cap_then_upgrade() {
    let fx = setup().await;
    let admin = fx.caller(&fx.acme, Role::Admin);

    for title in ["a", "b", "c"] {
        fx.svc.create(&admin, note(title)).await.unwrap();
    }

    let err = fx.svc.create(&admin, note("d")).await.unwrap_err();
    assert!(matches!(err, NotelyError::QuotaExceeded { limit: 3 }));
    assert!(err.to_string().contains("note limit"));

    let tenant = fx.svc.upgrade_plan(&admin, "acme").await.unwrap();
    assert_eq!(tenant.plan, Plan::Pro);

    let d = fx.svc.create(&admin, note("d")).await.unwrap();
    assert_eq!(d.title, "d");
    for i in 0..5 {
        fx.svc.create(&admin, note(&format!("extra {i}"))).await.unwrap();
    }
    assert_eq!(fx.svc.list(&admin).await.unwrap().len(), 9);
}

#[tokio::test]
async fn note_takes_tenant_and_author_from_claims() {
    let fx = setup().await;
    let member = fx.caller(&fx.acme, Role::Member);

    let created = fx.svc.create(&member, note("mine")).await.unwrap();
    assert_eq!(created.tenant_id, fx.acme.id);
    assert_eq!(created.user_id, member.user_id);
}

#[tokio::test]
async fn tenants_are_isolated() {
    let fx = setup().await;
    let acme_user = fx.caller(&fx.acme, Role::Member);
    let globex_admin = fx.caller(&fx.globex, Role::Admin);

    let secret = fx.svc.create(&acme_user, note("acme only")).await.unwrap();

    assert!(fx.svc.list(&globex_admin).await.unwrap().is_empty());
    for result in [
        fx.svc.get(&globex_admin, secret.id).await.map(|_| ()),
        fx.svc
            .update(&globex_admin, secret.id, note("x"))
            .await
            .map(|_| ()),
        fx.svc.delete(&globex_admin, secret.id).await,
    ] {
        assert!(matches!(result, Err(NotelyError::NotFound { .. })));
    }

    let listed = fx.svc.list(&acme_user).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "acme only");
}

#[tokio::test]
async fn list_is_newest_first() {
    let fx = setup().await;
    let admin = fx.caller(&fx.acme, Role::Admin);
    for title in ["first", "second", "third"] {
        fx.svc.create(&admin, note(title)).await.unwrap();
    }

    let titles: Vec<_> = fx
        .svc
        .list(&admin)
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.title)
        .collect();
    assert_eq!(titles, ["third", "second", "first"]);
}

#[tokio::test]
async fn member_modifies_only_own_notes() {
    let fx = setup().await;
    let alice = fx.caller(&fx.acme, Role::Member);
    let bob = fx.caller(&fx.acme, Role::Member);

    let alices = fx.svc.create(&alice, note("alice")).await.unwrap();

    let err = fx
        .svc
        .update(&bob, alices.id, note("bob was here"))
        .await
        .unwrap_err();
    assert!(matches!(err, NotelyError::AuthorizationDenied { .. }));
    let err = fx.svc.delete(&bob, alices.id).await.unwrap_err();
    assert!(matches!(err, NotelyError::AuthorizationDenied { .. }));

    // Reading is allowed for everyone in the tenant.
    let seen = fx.svc.get(&bob, alices.id).await.unwrap();
    assert_eq!(seen.title, "alice");

    let updated = fx
        .svc
        .update(&alice, alices.id, NoteInput::new("alice v2", "new"))
        .await
        .unwrap();
    assert_eq!(updated.title, "alice v2");
    assert_eq!(updated.content, "new");
    assert_eq!(updated.user_id, alice.user_id);

    fx.svc.delete(&alice, alices.id).await.unwrap();
    assert!(matches!(
        fx.svc.get(&alice, alices.id).await,
        Err(NotelyError::NotFound { .. })
    ));
}

#[tokio::test]
async fn admin_modifies_any_note_in_tenant() {
    let fx = setup().await;
    let admin = fx.caller(&fx.acme, Role::Admin);
    let member = fx.caller(&fx.acme, Role::Member);

    let theirs = fx.svc.create(&member, note("member note")).await.unwrap();

    let updated = fx
        .svc
        .update(&admin, theirs.id, note("moderated"))
        .await
        .unwrap();
    assert_eq!(updated.title, "moderated");
    assert_eq!(updated.user_id, member.user_id);

    fx.svc.delete(&admin, theirs.id).await.unwrap();
    assert!(fx.svc.list(&member).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_frees_a_quota_slot() {
    let fx = setup().await;
    let admin = fx.caller(&fx.acme, Role::Admin);

    let mut first = None;
    for title in ["a", "b", "c"] {
        let n = fx.svc.create(&admin, note(title)).await.unwrap();
        first.get_or_insert(n.id);
    }
    assert!(fx.svc.create(&admin, note("d")).await.is_err());

    fx.svc.delete(&admin, first.unwrap()).await.unwrap();
    assert!(fx.svc.create(&admin, note("d")).await.is_ok());
}

#[tokio::test]
async fn invalid_input_is_rejected_before_insert() {
    let fx = setup().await;
    let admin = fx.caller(&fx.acme, Role::Admin);

    let err = fx
        .svc
        .create(&admin, NoteInput::new("  ", "body"))
        .await
        .unwrap_err();
    assert!(matches!(err, NotelyError::Validation { .. }));
    assert!(fx.svc.list(&admin).await.unwrap().is_empty());
}

#[tokio::test]
async fn upgrade_rules() {
    let fx = setup().await;
    let acme_admin = fx.caller(&fx.acme, Role::Admin);
    let acme_member = fx.caller(&fx.acme, Role::Member);

    // Admin of another tenant guessing a valid slug.
    let err = fx.svc.upgrade_plan(&acme_admin, "globex").await.unwrap_err();
    assert!(matches!(err, NotelyError::AuthorizationDenied { .. }));

    let err = fx.svc.upgrade_plan(&acme_member, "acme").await.unwrap_err();
    assert!(matches!(err, NotelyError::AuthorizationDenied { .. }));

    let err = fx
        .svc
        .upgrade_plan(&acme_admin, "no-such-tenant")
        .await
        .unwrap_err();
    assert!(matches!(err, NotelyError::AuthorizationDenied { .. }));

    assert_eq!(
        fx.tenants.get_by_id(fx.acme.id).await.unwrap().plan,
        Plan::Free
    );
    assert_eq!(
        fx.tenants.get_by_id(fx.globex.id).await.unwrap().plan,
        Plan::Free
    );
}

#[tokio::test]
async fn upgrade_is_idempotent() {
    let fx = setup().await;
    let admin = fx.caller(&fx.globex, Role::Admin);

    for _ in 0..2 {
        let tenant = fx.svc.upgrade_plan(&admin, "globex").await.unwrap();
        assert_eq!(tenant.plan, Plan::Pro);
    }
    assert_eq!(
        fx.tenants.get_by_id(fx.globex.id).await.unwrap().plan,
        Plan::Pro
    );
    // Acme untouched.
    assert_eq!(
        fx.tenants.get_by_id(fx.acme.id).await.unwrap().plan,
        Plan::Free
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_resolve_to_note_or_quota_error() {
    let fx = setup().await;
    let admin = fx.caller(&fx.acme, Role::Admin);
    let svc = std::sync::Arc::new(fx.svc);

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let svc = svc.clone();
            let admin = admin.clone();
            tokio::spawn(async move { svc.create(&admin, note(&format!("n{i}"))).await })
        })
        .collect();

    let (mut created, mut over_quota) = (0, 0);
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(NotelyError::QuotaExceeded { limit: 3 }) => over_quota += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!((created, over_quota), (3, 3));
}
