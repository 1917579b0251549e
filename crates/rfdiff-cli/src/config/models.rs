use rfdiff::client::ClientConfig;
use rfdiff::workflows::generate::GenerationJob;

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub job: GenerationJob,
    pub client: ClientConfig,
}
