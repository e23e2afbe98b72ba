use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::info;
use tracing_subscriber::EnvFilter;

use herald_core::app::CampaignBuilder;
use herald_core::domain::{ContentBundle, PlatformRegistry};
use herald_core::impls::{OsRandom, SimulatedGateway};
use herald_core::ports::{Credentials, PlatformError, PlatformGateway, RandomSource, Submission};
use herald_core::HeraldConfig;

/// `herald-cli [input.json]` の入力。省略時はデモ用の値を使う。
#[derive(Debug, Deserialize)]
#[serde(default)]
struct DemoInput {
    topic: String,
    audience: String,
    tasks: Vec<String>,
    config: HeraldConfig,
}

impl Default for DemoInput {
    fn default() -> Self {
        Self {
            topic: "Remote Work".to_string(),
            audience: "recent graduates".to_string(),
            tasks: vec![
                "Integrate and analyze multiple complex systems".to_string(),
                "Create a social post about secure payouts".to_string(),
            ],
            config: HeraldConfig::default().with_campaign_spend(500.0),
        }
    }
}

/// 最初の n 回だけ失敗する投稿先
struct FlakyGateway {
    inner: SimulatedGateway,
    remaining_failures: AtomicU32,
}

impl FlakyGateway {
    fn new(random: Arc<dyn RandomSource>, n: u32) -> Self {
        Self {
            inner: SimulatedGateway::new(random),
            remaining_failures: AtomicU32::new(n),
        }
    }
}

#[async_trait]
impl PlatformGateway for FlakyGateway {
    async fn submit(
        &self,
        bundle: &ContentBundle,
        credentials: &Credentials,
    ) -> Result<Submission, PlatformError> {
        let left = self.remaining_failures.load(Ordering::Relaxed);
        if left > 0 {
            self.remaining_failures.fetch_sub(1, Ordering::Relaxed);
            return Err(PlatformError::Transport(format!(
                "intentional failure (left={left})"
            )));
        }
        self.inner.submit(bundle, credentials).await
    }
}

fn load_input() -> Result<DemoInput, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?),
        None => Ok(DemoInput::default()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let input = load_input()?;

    // (A) 組み込みプラットフォームすべてに gateway を用意（snapchat だけ 1 回失敗する）
    let random: Arc<dyn RandomSource> = Arc::new(OsRandom);
    let mut builder = CampaignBuilder::new()
        .random(random.clone())
        .config(input.config);
    for id in PlatformRegistry::global().ids() {
        let gateway: Arc<dyn PlatformGateway> = if id.as_str() == "snapchat" {
            Arc::new(FlakyGateway::new(random.clone(), 1))
        } else {
            Arc::new(SimulatedGateway::new(random.clone()))
        };
        let credentials = Credentials::new(format!("herald-{id}"), "demo-token");
        builder = builder.gateway(id, gateway, credentials);
    }
    let campaign = builder
        .expect_platforms(&["tiktok", "instagram", "youtube"])
        .build()?;

    // (B) タスク分類
    for description in &input.tasks {
        let task = campaign.classify(description);
        println!(
            "task {}: complexity={} capabilities={:?}",
            task.id(),
            task.complexity(),
            task.required_capabilities()
        );
    }

    // (C) 2 回実行。1 回目の snapchat 失敗はレポートの recommendations に出る
    for round in 1..=2 {
        let outcome = campaign.run(&input.topic, &input.audience).await;
        info!(round, campaign_id = %outcome.campaign_id, "round complete");
        println!("{}", serde_json::to_string_pretty(&outcome.report)?);
        if let Some(roi) = outcome.roi {
            println!("roi: {roi:.2}%");
        }
    }

    println!("counts: {:?}", campaign.coordinator().counts().await);
    Ok(())
}
