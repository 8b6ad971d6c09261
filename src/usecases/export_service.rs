//! Export service. Renders leads to CSV and hands the file to the export port.

use crate::adapters::export::leads_to_csv;
use crate::domain::DomainError;
use crate::ports::ExportPort;
use crate::usecases::metrics::MetricsService;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

pub struct ExportService {
    metrics: MetricsService,
    exporter: Arc<dyn ExportPort>,
}

impl ExportService {
    pub fn new(metrics: MetricsService, exporter: Arc<dyn ExportPort>) -> Self {
        Self { metrics, exporter }
    }

    /// File name for the leads export, stamped with the dataset's as-of date.
    pub fn leads_file_name(&self) -> String {
        format!("leads_{}.csv", self.metrics.anchor())
    }

    /// Write every lead to `leads_<anchor>.csv`. Returns the written path.
    pub async fn export_leads(&self) -> Result<PathBuf, DomainError> {
        let leads = &self.metrics.dataset().leads;
        let csv = leads_to_csv(leads)
            .map_err(|e| DomainError::Export(format!("Failed to generate CSV: {}", e)))?;
        let path = self
            .exporter
            .write_export(&self.leads_file_name(), &csv)
            .await?;
        info!(leads = leads.len(), path = %path.display(), "leads exported");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::metrics::test_support::service;
    use std::path::Path;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct CapturingExporter {
        written: Mutex<Vec<(String, String)>>,
    }

    #[async_trait::async_trait]
    impl ExportPort for CapturingExporter {
        async fn write_export(
            &self,
            file_name: &str,
            contents: &str,
        ) -> Result<PathBuf, DomainError> {
            self.written
                .lock()
                .await
                .push((file_name.to_string(), contents.to_string()));
            Ok(Path::new("/exports").join(file_name))
        }
    }

    #[tokio::test]
    async fn exports_all_leads_under_dated_name() {
        let exporter = Arc::new(CapturingExporter::default());
        let svc = ExportService::new(service(), Arc::clone(&exporter) as Arc<dyn ExportPort>);

        let path = svc.export_leads().await.unwrap();
        assert_eq!(path, Path::new("/exports/leads_2024-06-30.csv"));

        let written = exporter.written.lock().await;
        let (name, csv) = &written[0];
        assert_eq!(name, "leads_2024-06-30.csv");
        // Header plus one line per lead.
        assert_eq!(csv.lines().count(), 25);
    }
}
