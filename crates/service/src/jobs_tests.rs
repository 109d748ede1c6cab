#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use travel_sync_core::Search;
    use travel_sync_core::config::LoaderConfig;
    use travel_sync_storage::MemoryStore;

    use crate::test_support::{NO_PACING, StubPlaces, StubWeather, feeds};
    use crate::{JobRecord, JobService, JobStatus, LoadStage, Loader};

    fn service(store: &Arc<MemoryStore>) -> Arc<JobService> {
        let places = StubPlaces::default().with("restaurant", vec![vec!["r1"]]);
        let config = LoaderConfig { categories: vec!["restaurant".to_owned()], ..LoaderConfig::default() };
        let loader = Loader::new(store.clone(), feeds(places, StubWeather::default()), config).with_pacing(NO_PACING);
        Arc::new(JobService::new(Arc::new(loader)))
    }

    async fn wait_finished(jobs: &JobService, trace_id: &str) -> JobRecord {
        for _ in 0..200 {
            let record = jobs.status(trace_id).await.unwrap();
            if record.status.is_finished() {
                return record;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("job {trace_id} did not finish");
    }

    #[tokio::test]
    async fn test_submitted_job_succeeds() {
        let store = Arc::new(MemoryStore::new());
        let jobs = service(&store);

        let trace_id = jobs.submit(Search::new("sydney", "AU", -33.86, 151.2)).await;
        let record = wait_finished(&jobs, &trace_id).await;

        let JobStatus::Succeeded { report } = &record.status else {
            panic!("unexpected status {:?}", record.status);
        };
        assert_eq!(report.categories[0].added, 1);
        assert!(record.finished_at.is_some());
        assert_eq!(store.count_cities_named("sydney").await, 1);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["trace_id"], trace_id);
        assert_eq!(json["status"], "succeeded");
        assert_eq!(json["report"]["city"]["name"], "sydney");
    }

    #[tokio::test]
    async fn test_failed_job_records_stage() {
        let store = Arc::new(MemoryStore::new());
        let jobs = service(&store);

        let trace_id = jobs.submit(Search::new("atlantis", "XX", 1.0, 1.0)).await;
        let record = wait_finished(&jobs, &trace_id).await;

        match record.status {
            JobStatus::Failed { stage, error } => {
                assert_eq!(stage, LoadStage::Advisory);
                assert!(error.contains("XX"), "{error}");
            },
            other => panic!("unexpected status {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_trace_id() {
        let jobs = service(&Arc::new(MemoryStore::new()));
        assert!(jobs.status("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_trace_ids_are_unique() {
        let jobs = service(&Arc::new(MemoryStore::new()));
        let a = jobs.submit(Search::new("sydney", "AU", -33.86, 151.2)).await;
        let b = jobs.submit(Search::new("sydney", "AU", -33.86, 151.2)).await;
        assert_ne!(a, b);
    }
}
