use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use time::{Date, Duration, Month, OffsetDateTime};

use crate::app::db::{
    self,
    milestones::NewMilestone,
    projects::NewProject,
    tasks::NewTask,
    users::NewUser,
};
use crate::app::domain::{Email, PaymentStatus, ProjectStatus, TaskStatus, UserId, UserRole};
use crate::seeds::{Seed, SeedOutcome};

/// Demo clients, projects, milestones and tasks spread over the current year, so
/// progress bars and the payment report have something to show. Opt in with
/// SEED_DEMO_DATA=1.
pub struct DemoPortfolio;

struct DemoMilestone {
    title: &'static str,
    price: i64,
    payment: PaymentStatus,
    partial_amount: Option<i64>,
    paid_in: Option<Month>,
    tasks: &'static [(&'static str, TaskStatus)],
}

struct DemoProject {
    title: &'static str,
    slug: &'static str,
    status: ProjectStatus,
    client: Option<usize>,
    days_since_update: i64,
    milestones: &'static [DemoMilestone],
}

const CLIENTS: &[(&str, &str)] = &[
    ("Harbor Coffee Co.", "hello@harborcoffee.example"),
    ("Northwind Outfitters", "studio@northwind.example"),
    ("Atlas Dental", "office@atlasdental.example"),
];

const PROJECTS: &[DemoProject] = &[
    DemoProject {
        title: "Harbor Coffee rebrand",
        slug: "harbor-coffee-rebrand",
        status: ProjectStatus::InProgress,
        client: Some(0),
        days_since_update: 2,
        milestones: &[
            DemoMilestone {
                title: "Discovery",
                price: 1500,
                payment: PaymentStatus::Paid,
                partial_amount: None,
                paid_in: Some(Month::January),
                tasks: &[
                    ("Stakeholder interviews", TaskStatus::Approved),
                    ("Moodboards", TaskStatus::Approved),
                ],
            },
            DemoMilestone {
                title: "Identity system",
                price: 4000,
                payment: PaymentStatus::Partial,
                partial_amount: Some(2000),
                paid_in: Some(Month::March),
                tasks: &[
                    ("Logo explorations", TaskStatus::Approved),
                    ("Colour palette", TaskStatus::Submitted),
                    ("Type pairing", TaskStatus::InProgress),
                ],
            },
            DemoMilestone {
                title: "Packaging",
                price: 3500,
                payment: PaymentStatus::Unpaid,
                partial_amount: None,
                paid_in: None,
                tasks: &[("Bag dielines", TaskStatus::Todo)],
            },
        ],
    },
    DemoProject {
        title: "Northwind storefront",
        slug: "northwind-storefront",
        status: ProjectStatus::Review,
        client: Some(1),
        days_since_update: 10,
        milestones: &[
            DemoMilestone {
                title: "Design",
                price: 6000,
                payment: PaymentStatus::Paid,
                partial_amount: None,
                paid_in: Some(Month::March),
                tasks: &[
                    ("Wireframes", TaskStatus::Approved),
                    ("High fidelity", TaskStatus::Approved),
                ],
            },
            DemoMilestone {
                title: "Build",
                price: 9000,
                payment: PaymentStatus::Unpaid,
                partial_amount: None,
                paid_in: None,
                tasks: &[
                    ("Theme", TaskStatus::Submitted),
                    ("Checkout", TaskStatus::Rejected),
                ],
            },
        ],
    },
    DemoProject {
        title: "Atlas Dental signage",
        slug: "atlas-dental-signage",
        status: ProjectStatus::Draft,
        client: Some(2),
        days_since_update: 40,
        milestones: &[DemoMilestone {
            title: "Concepts",
            price: 1200,
            payment: PaymentStatus::Unpaid,
            partial_amount: None,
            paid_in: None,
            tasks: &[("Site survey", TaskStatus::Todo)],
        }],
    },
    DemoProject {
        title: "Studio showreel",
        slug: "studio-showreel",
        status: ProjectStatus::InProgress,
        client: None,
        days_since_update: 1,
        milestones: &[],
    },
];

fn new_id() -> String {
    ulid::Ulid::new().to_string()
}

#[async_trait]
impl Seed for DemoPortfolio {
    fn version(&self) -> i64 {
        20260301100100
    }

    fn description(&self) -> &str {
        "demo_portfolio"
    }

    async fn run(&self, pool: &SqlitePool) -> Result<SeedOutcome, sqlx::Error> {
        if std::env::var("SEED_DEMO_DATA").ok().as_deref() != Some("1") {
            return Ok(SeedOutcome::Skipped);
        }

        let now = OffsetDateTime::now_utc();
        let year = now.year();
        let mut tx = pool.begin().await?;

        let mut client_ids = Vec::with_capacity(CLIENTS.len());
        for (name, email) in CLIENTS {
            let email = Email::new(*email).map_err(|e| sqlx::Error::Protocol(e.to_string()))?;
            if let Some(existing) = db::users::find_by_email(&mut *tx, &email).await? {
                client_ids.push(existing.id);
                continue;
            }
            let id = UserId::new();
            db::users::insert(
                &mut *tx,
                &NewUser {
                    id: id.clone(),
                    name: name.to_string(),
                    email,
                    role: UserRole::Client,
                },
            )
            .await?;
            client_ids.push(id.as_str());
        }

        for demo in PROJECTS {
            if db::projects::find_by_slug(&mut *tx, demo.slug).await?.is_some() {
                continue;
            }
            let project_id = new_id();
            db::projects::insert(
                &mut *tx,
                &NewProject {
                    id: project_id.clone(),
                    title: demo.title.to_string(),
                    slug: demo.slug.to_string(),
                    status: demo.status,
                    client_id: demo.client.map(|i| client_ids[i].clone()),
                },
            )
            .await?;

            for (order, m) in demo.milestones.iter().enumerate() {
                let milestone_id = new_id();
                let payment_date = match m.paid_in {
                    Some(month) => Some(
                        Date::from_calendar_date(year, month, 15)
                            .map_err(|e| sqlx::Error::Protocol(e.to_string()))?,
                    ),
                    None => None,
                };
                db::milestones::insert(
                    &mut *tx,
                    &NewMilestone {
                        id: milestone_id.clone(),
                        project_id: project_id.clone(),
                        title: m.title.to_string(),
                        sort_order: order as i64,
                        price: Some(Decimal::from(m.price)),
                        payment_status: m.payment,
                        payment_amount: m.partial_amount.map(Decimal::from),
                        payment_date,
                        is_visible: true,
                    },
                )
                .await?;

                for (title, status) in m.tasks {
                    db::tasks::insert(
                        &mut *tx,
                        &NewTask {
                            id: new_id(),
                            milestone_id: milestone_id.clone(),
                            title: title.to_string(),
                            status: *status,
                            is_visible: true,
                        },
                    )
                    .await?;
                }
            }

            let updated_at = (now - Duration::days(demo.days_since_update)).unix_timestamp();
            db::projects::set_updated_at(&mut *tx, &project_id, updated_at).await?;
        }

        tx.commit().await?;
        Ok(SeedOutcome::Applied)
    }
}
