use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(autofix_workshop_migration::Migrator).await;
}
