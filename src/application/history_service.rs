// History service - Use cases for well listing and historical queries
use crate::application::drilling_repository::DrillingRepository;
use crate::application::error::ClientError;
use crate::domain::telemetry::Series;
use crate::domain::time_window::{TimeWindow, format_wire_time};
use crate::domain::well::Well;
use chrono::NaiveDateTime;
use std::sync::Arc;

#[derive(Clone)]
pub struct HistoryService {
    repository: Arc<dyn DrillingRepository>,
}

impl HistoryService {
    pub fn new(repository: Arc<dyn DrillingRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_wells(&self) -> Result<Vec<Well>, ClientError> {
        let wells = self.repository.list_wells().await?;
        tracing::debug!("Loaded {} wells", wells.len());
        Ok(wells)
    }

    pub async fn query(
        &self,
        well_id: &str,
        window: TimeWindow,
        now: NaiveDateTime,
    ) -> Result<Series, ClientError> {
        let (start, end) = window.resolve(now);
        tracing::debug!(
            "Querying well {} from {} to {}",
            well_id,
            format_wire_time(&start),
            format_wire_time(&end)
        );

        let series = self.repository.query_drilling_data(well_id, start, end).await?;
        tracing::info!(
            "Received {} readings for well {}",
            series.readings.len(),
            series.well_name
        );
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{FakeRepository, now};

    #[tokio::test]
    async fn test_query_resolves_window() {
        let repo = Arc::new(FakeRepository::default());
        let service = HistoryService::new(repo.clone());

        let window = TimeWindow::relative(2, 30).unwrap();
        let series = service.query("7", window, now()).await.unwrap();

        assert_eq!(series.well_name, "Tarim 101");
        assert_eq!(
            repo.calls(),
            vec!["query 7 2024-03-15 10:00:00 2024-03-15 12:30:00".to_string()]
        );
    }

    #[tokio::test]
    async fn test_list_wells() {
        let repo = Arc::new(FakeRepository::default());
        let service = HistoryService::new(repo);

        let wells = service.list_wells().await.unwrap();
        let labels: Vec<String> = wells.iter().map(Well::label).collect();
        assert_eq!(labels, vec!["7-Tarim 101", "9-Shengli 3"]);
    }
}
