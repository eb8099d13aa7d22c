// Repository trait for the cases-by-time feature service
use crate::domain::cases_by_time::CasesByTimeFeature;
use crate::domain::feature_query::FeatureQuery;
use async_trait::async_trait;

#[async_trait]
pub trait CasesByTimeRepository: Send + Sync {
    /// Run a query and return the rows' attributes in service order.
    /// A response without a `features` array is an error.
    async fn query_cases_by_time(
        &self,
        query: &FeatureQuery,
    ) -> anyhow::Result<Vec<CasesByTimeFeature>>;
}
