use tracing::{debug, warn};

use shared_config::AppConfig;
use shared_database::SupabaseClient;

use crate::models::DashboardStats;

pub struct DashboardService {
    supabase: SupabaseClient,
}

impl DashboardService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Record counts for the dashboard cards. A table that cannot be counted shows 0.
    pub async fn stats(&self) -> DashboardStats {
        debug!("Counting dashboard records");

        let (departments, doctors, services, schedules) = futures::join!(
            self.count("departments"),
            self.count("doctors"),
            self.count("services"),
            self.count("doctor_schedules"),
        );

        DashboardStats {
            departments,
            doctors,
            services,
            schedules,
        }
    }

    async fn count(&self, table: &str) -> u64 {
        let path = format!("/rest/v1/{}?select=id", table);
        match self.supabase.count(&path, None).await {
            Ok(total) => total,
            Err(e) => {
                warn!("Failed to count {}: {}", table, e);
                0
            }
        }
    }
}
