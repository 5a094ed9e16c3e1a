use sea_orm::{ConnectionTrait, Database, DbErr, Statement};
use std::env;

const TABLES: [&str; 9] = [
    "event_artists",
    "events",
    "event_ratchets",
    "artworks",
    "artwork_ratchets",
    "genres",
    "artists",
    "artist_ratchets",
    "seaql_migrations",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let database_url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?;

    let db = Database::connect(database_url).await?;
    let backend = db.get_database_backend();

    for table in TABLES {
        drop_table(&db, backend, table).await?;
    }
    println!("Database reset successfully");
    Ok(())
}

async fn drop_table<C: ConnectionTrait>(db: &C, backend: sea_orm::DbBackend, table: &str) -> Result<(), DbErr> {
    let sql = match backend {
        sea_orm::DbBackend::Postgres => format!("DROP TABLE IF EXISTS \"{}\" CASCADE;", table),
        _ => format!("DROP TABLE IF EXISTS \"{}\";", table),
    };
    db.execute(Statement::from_string(backend, sql)).await?;
    Ok(())
}
