#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use futures_util::StreamExt;
    use tokio::time::Instant;

    use crate::{FeedError, NearbyPage, NearbyRequest, PacingPolicy, PlaceFilter, PlaceResult, PlaceSearch, PlacesApi};

    #[derive(Default)]
    struct ScriptedPlaces {
        responses: Mutex<VecDeque<Result<NearbyPage, FeedError>>>,
        requests: Mutex<Vec<(NearbyRequest, Instant)>>,
    }

    impl ScriptedPlaces {
        fn new(responses: Vec<Result<NearbyPage, FeedError>>) -> Arc<Self> {
            Arc::new(Self { responses: Mutex::new(responses.into()), ..Self::default() })
        }

        fn requests(&self) -> Vec<(NearbyRequest, Instant)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PlacesApi for ScriptedPlaces {
        async fn nearby_search(&self, request: &NearbyRequest) -> Result<NearbyPage, FeedError> {
            self.requests.lock().unwrap().push((request.clone(), Instant::now()));
            self.responses.lock().unwrap().pop_front().unwrap_or_else(|| Ok(NearbyPage::default()))
        }
    }

    fn page(ids: &[&str], token: &str) -> Result<NearbyPage, FeedError> {
        Ok(NearbyPage {
            results: ids
                .iter()
                .map(|id| PlaceResult { place_id: (*id).to_owned(), name: format!("place {id}"), ..PlaceResult::default() })
                .collect(),
            next_page_token: token.to_owned(),
        })
    }

    fn search(api: Arc<ScriptedPlaces>) -> PlaceSearch {
        let filter = PlaceFilter { lat: -33.865143, lng: 151.2099, keyword: "bar".to_owned(), radius: 5000 };
        PlaceSearch::new(api, filter, PacingPolicy::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_k_pages_then_exhaustion() {
        let api = ScriptedPlaces::new(vec![page(&["a"], "t1"), page(&["b"], "t2"), page(&["c"], "")]);
        let mut pages = search(api.clone());

        let mut batches = Vec::new();
        while let Some(batch) = pages.next_page().await.unwrap() {
            batches.push(batch);
        }

        assert_eq!(batches.len(), 3);
        assert_eq!(batches[2][0].place_id, "c");
        assert!(pages.next_page().await.unwrap().is_none());
        assert_eq!(api.requests().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_later_pages_are_paced_and_carry_token() {
        let api = ScriptedPlaces::new(vec![page(&["a"], "t1"), page(&["b"], "")]);
        let mut pages = search(api.clone());

        pages.next_page().await.unwrap();
        pages.next_page().await.unwrap();

        let requests = api.requests();
        assert_eq!(requests[0].0.page_token, None);
        assert_eq!(requests[1].0.page_token.as_deref(), Some("t1"));
        assert!(requests[1].1 - requests[0].1 >= Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_request_twice_then_success() {
        let api = ScriptedPlaces::new(vec![
            Err(FeedError::InvalidRequest(String::new())),
            Err(FeedError::InvalidRequest(String::new())),
            page(&["a", "b"], ""),
        ]);
        let mut pages = search(api.clone());

        let batch = pages.next_page().await.unwrap().unwrap();
        assert_eq!(batch.len(), 2);

        let requests = api.requests();
        assert_eq!(requests.len(), 3);
        assert!(requests[1].1 - requests[0].1 >= Duration::from_secs(1));
        assert!(requests[2].1 - requests[1].1 < Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_attempts() {
        let api = ScriptedPlaces::new(vec![
            Err(FeedError::RateLimited("quota".to_owned())),
            Err(FeedError::InvalidRequest(String::new())),
            Err(FeedError::InvalidRequest("still early".to_owned())),
            page(&["never"], ""),
        ]);
        let mut pages = search(api.clone());

        let err = pages.next_page().await.unwrap_err();
        assert!(matches!(err, FeedError::InvalidRequest(ref msg) if msg == "still early"));
        assert_eq!(api.requests().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_errors_are_not_retried() {
        let api = ScriptedPlaces::new(vec![Err(FeedError::Api {
            status: "UNKNOWN_ERROR".to_owned(),
            message: String::new(),
        })]);
        let mut pages = search(api.clone());

        assert!(pages.next_page().await.is_err());
        assert_eq!(api.requests().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_pages_are_skipped() {
        let api = ScriptedPlaces::new(vec![page(&[], "t1"), page(&["a"], "t2"), page(&[], "")]);
        let mut pages = search(api.clone());

        let first = pages.next_page().await.unwrap().unwrap();
        assert_eq!(first[0].place_id, "a");
        assert!(pages.next_page().await.unwrap().is_none());
        assert_eq!(pages.pages_fetched(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_limit_stops_early() {
        let api = ScriptedPlaces::new(vec![page(&["a"], "t1"), page(&["b"], "")]);
        let mut pages = search(api.clone()).with_page_limit(1);

        assert!(pages.next_page().await.unwrap().is_some());
        assert!(pages.next_page().await.unwrap().is_none());
        assert_eq!(api.requests().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_yields_every_batch() {
        let api = ScriptedPlaces::new(vec![page(&["a"], "t1"), page(&["b", "c"], "")]);
        let batches: Vec<_> = search(api).into_stream().collect().await;

        assert_eq!(batches.len(), 2);
        assert_eq!(batches[1].as_ref().unwrap().len(), 2);
    }
}
