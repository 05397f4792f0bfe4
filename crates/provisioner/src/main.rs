//! `notion-scaffold` -- one-shot Notion page provisioner.
//!
//! Creates three weekly grocery pages under a parent page, each with a
//! task list and a "Store Information" database holding one seed row,
//! then exits.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default                     | Description                          |
//! |------------------------|----------|-----------------------------|--------------------------------------|
//! | `NOTION_API_KEY`       | yes      | --                          | Integration token                    |
//! | `PARENT_PAGE_ID`       | yes      | --                          | Page id or URL shared with the integration |
//! | `NOTION_API_URL`       | no       | `https://api.notion.com/v1` | API base URL                         |
//! | `NOTION_VERSION`       | no       | `2022-06-28`                | `Notion-Version` header              |
//! | `REQUEST_TIMEOUT_SECS` | no       | `30`                        | Per-request HTTP timeout             |
//! | `LOG_FORMAT`           | no       | --                          | `json` for JSON log lines            |

use std::sync::Arc;

use scaffold_notion::NotionApi;
use scaffold_provisioner::config::ProvisionerConfig;
use scaffold_provisioner::provisioner::StructureProvisioner;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "notion_scaffold=info,scaffold_provisioner=info,scaffold_notion=info".into()
            }),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    let config = ProvisionerConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    tracing::info!(
        parent_page_id = %config.parent_page_id,
        api_url = %config.api_url,
        notion_version = %config.notion_version,
        "Starting notion-scaffold",
    );

    let api = NotionApi::new(&config.notion_api_config()).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build Notion client");
        std::process::exit(1);
    });

    let provisioner = StructureProvisioner::new(Arc::new(api));
    provisioner.create_structure(&config.parent_page_id).await;
}
