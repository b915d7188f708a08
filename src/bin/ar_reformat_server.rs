//! AR Reformat API Server binary
//!
//! HTTP upload API for converting receivables listings.

use ar_reformat::api::{run_api_server, ApiConfig};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "ar-reformat-server")]
#[command(version)]
#[command(about = "AR Reformat API Server - upload receivables listings, download debtor CSV")]
#[command(long_about = r#"
AR Reformat API Server

Endpoints:
  - POST /api/v1/convert   - Body: .xlsx listing. Returns converted_data.csv
  - POST /api/v1/preview   - Body: .xlsx listing. Returns the rows as JSON
  - GET  /api/v1/template  - Empty workbook in the accepted layout

Additional endpoints:
  - GET  /health           - Health check
  - GET  /version          - Server version info
  - GET  /                 - API documentation

Both upload endpoints accept ?sheet=NAME to read a sheet other than the first.

Example usage:
  ar-reformat-server                           # Start on localhost:8080
  ar-reformat-server --host 0.0.0.0 --port 3000

  curl -X POST http://localhost:8080/api/v1/convert \
    --data-binary @aged_receivables.xlsx -o converted_data.csv
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "AR_REFORMAT_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "AR_REFORMAT_PORT")]
    port: u16,

    /// Largest accepted upload, in bytes
    #[arg(long, default_value = "10485760", env = "AR_REFORMAT_MAX_UPLOAD")]
    max_upload_bytes: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        max_upload_bytes: args.max_upload_bytes,
    };

    run_api_server(config).await
}
