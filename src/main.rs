use clap::Parser;
use coursecraft::db::Db;
use coursecraft::email::ResendEmailSender;
use coursecraft::judge::JudgeClient;
use coursecraft::services::auth::AuthService;
use coursecraft::services::campaign::CampaignService;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// PostgreSQL connection string.
    #[clap(long, env)]
    database_url: String,

    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:3000")]
    address: String,

    /// Public base URL used in verification and reset links.
    #[arg(long, env, default_value = "http://localhost:3000")]
    base_url: String,

    /// Resend API key. Without it the app runs in dev mode: no email goes
    /// out and new accounts are verified immediately.
    #[arg(long, env)]
    resend_api_key: Option<String>,

    /// Base URL of the code judge. Without it code submission is disabled.
    #[arg(long, env)]
    judge_url: Option<String>,

    /// Mark session cookies as Secure.
    #[arg(long, env)]
    secure_cookies: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "tracing=info,coursecraft=debug".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    let db = Db::new(&args.database_url).await?;
    let email = ResendEmailSender::new(args.resend_api_key);
    if !email.is_enabled() {
        tracing::info!("no Resend API key set, running in dev mode");
    }

    let state = coursecraft::AppState {
        auth: AuthService::new(db.clone(), email.clone(), args.base_url),
        campaigns: CampaignService::new(db.clone(), email),
        judge: JudgeClient::new(args.judge_url),
        db,
        secure_cookies: args.secure_cookies,
    };
    let app = coursecraft::router(state);

    let listener = tokio::net::TcpListener::bind(&args.address).await?;
    tracing::info!("listening on {}", args.address);
    axum::serve(listener, app).await?;

    Ok(())
}
