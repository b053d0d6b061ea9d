use migration::Migrator;
use sea_orm_migration::cli;

/// `DATABASE_URL=... cargo run -p migration -- up` (also `down`, `status`, `fresh`)
#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
