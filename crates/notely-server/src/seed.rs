//! Demo tenants and users.

use notely_core::error::{NotelyError, NotelyResult};
use notely_core::models::tenant::CreateTenant;
use notely_core::models::user::{CreateUser, Role};
use notely_core::repository::{TenantRepository, UserRepository};
use tracing::info;

pub const DEMO_PASSWORD: &str = "password";

const TENANTS: &[(&str, &str)] = &[("acme", "Acme"), ("globex", "Globex")];

const USERS: &[(&str, &str, Role)] = &[
    ("admin@acme.test", "acme", Role::Admin),
    ("user@acme.test", "acme", Role::Member),
    ("admin@globex.test", "globex", Role::Admin),
    ("user@globex.test", "globex", Role::Member),
];

/// What a seed run inserted.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub tenants_created: usize,
    pub users_created: usize,
}

/// Provision the demo data. Records that already exist are left as they
/// are, so running this twice is harmless.
pub async fn seed<T, U>(tenants: &T, users: &U) -> NotelyResult<SeedReport>
where
    T: TenantRepository,
    U: UserRepository,
{
    let mut report = SeedReport::default();

    for &(slug, name) in TENANTS {
        match tenants.get_by_slug(slug).await {
            Ok(_) => {}
            Err(NotelyError::NotFound { .. }) => {
                tenants
                    .create(CreateTenant {
                        name: name.into(),
                        slug: slug.into(),
                    })
                    .await?;
                report.tenants_created += 1;
            }
            Err(e) => return Err(e),
        }
    }

    for &(email, slug, role) in USERS {
        match users.get_by_email(email).await {
            Ok(_) => continue,
            Err(NotelyError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }
        let tenant = tenants.get_by_slug(slug).await?;
        users
            .create(CreateUser {
                tenant_id: tenant.id,
                email: email.into(),
                password: DEMO_PASSWORD.into(),
                role,
            })
            .await?;
        report.users_created += 1;
    }

    info!(
        tenants = report.tenants_created,
        users = report.users_created,
        "seed complete"
    );
    Ok(report)
}
