use crate::domain::model::LoadReport;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// 給使用者看的完整路徑
    fn display_path(&self, path: &str) -> String;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    type Raw: Send;
    type Output: Send;

    async fn extract(&self) -> Result<Self::Raw>;
    async fn transform(&self, raw: Self::Raw) -> Result<Self::Output>;
    async fn load(&self, output: Self::Output) -> Result<LoadReport>;
}
