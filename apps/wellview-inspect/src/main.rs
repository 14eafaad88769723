//! 告警视图查询工具：连接 Postgres 文档库，按资产输出一个告警视图（JSON）。

mod args;

use args::{InspectArgs, USAGE, View};
use domain::RequestContext;
use std::sync::Arc;
use tracing::Instrument;
use wellview_alarms::{AlarmViewService, RtuAlarmQuery};
use wellview_config::AppConfig;
use wellview_storage::{
    PgAlarmConfigurationStore, PgAssetMasterStore, PgCameraStore, PgCustomerStore, PgLookupStore,
    PgNotificationStore, PgParameterStore, connect_pool,
};
use wellview_telemetry::{TracingDiagnosticLog, init_tracing, new_correlation_id};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在）
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing();

    let args = match InspectArgs::parse(std::env::args().skip(1), &config.default_locale) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}\n{USAGE}");
            std::process::exit(2);
        }
    };

    // Postgres 文档存储（需先执行 migrations）
    let pool = connect_pool(&config.database_url, config.db_max_connections).await?;
    let service = AlarmViewService::builder()
        .asset_master(Arc::new(PgAssetMasterStore::new(pool.clone())))
        .customers(Arc::new(PgCustomerStore::new(pool.clone())))
        .lookups(Arc::new(PgLookupStore::new(pool.clone())))
        .alarm_configurations(Arc::new(PgAlarmConfigurationStore::new(pool.clone())))
        .parameters(Arc::new(PgParameterStore::new(pool.clone())))
        .notifications(Arc::new(PgNotificationStore::new(pool.clone())))
        .cameras(Arc::new(PgCameraStore::new(pool)))
        .diagnostic_log(Arc::new(TracingDiagnosticLog::new()))
        .build()?;

    let ctx = RequestContext::new(args.customer_id, new_correlation_id()).with_locale(&args.locale);
    let span = tracing::info_span!(
        "inspect",
        correlation_id = %ctx.correlation_id,
        view = args.view.as_str(),
        asset_id = %args.asset_id
    );
    let output = render(&service, &ctx, &args).instrument(span).await?;
    println!("{output}");
    Ok(())
}

async fn render(
    service: &AlarmViewService,
    ctx: &RequestContext,
    args: &InspectArgs,
) -> Result<String, Box<dyn std::error::Error>> {
    let asset_id = &args.asset_id;
    let output = match args.view {
        View::Rtu => {
            let query = RtuAlarmQuery {
                poc_type: args.poc_type,
                ..RtuAlarmQuery::default()
            };
            let alarms = service
                .get_rtu_alarm_configuration(ctx, asset_id, query)
                .await?;
            serde_json::to_string_pretty(&alarms)?
        }
        View::Host => serde_json::to_string_pretty(&service.get_host_alarms(ctx, asset_id).await?)?,
        View::FacilityTags => {
            serde_json::to_string_pretty(&service.get_facility_tag_alarms(ctx, asset_id).await?)?
        }
        View::Cameras => {
            serde_json::to_string_pretty(&service.get_camera_alarms(ctx, asset_id).await?)?
        }
        View::Facility => serde_json::to_string_pretty(&service.get_facility(ctx, asset_id).await?)?,
    };
    Ok(output)
}
