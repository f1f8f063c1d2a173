use dotenvy::dotenv;

use fabriq::logging::init_tracing;
use fabriq::router::init_router;
use fabriq::state::init_app_state;
use fabriq_config::ServerConfig;
use fabriq_core::password::hash_password;
use fabriq_core::permissions::Role;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    // Check if this is a CLI command
    if args.len() > 1 && args[1] == "create-admin" {
        handle_create_admin(args).await;
        return;
    }

    // Normal server startup
    init_tracing();

    let state = init_app_state().await;

    sqlx::migrate!()
        .run(&state.db)
        .await
        .expect("Failed to run database migrations");

    let app = init_router(state);
    let server_config = ServerConfig::from_env();

    let listener = tokio::net::TcpListener::bind(server_config.bind_addr())
        .await
        .unwrap();
    println!("🚀 Fabriq API running on http://{}", server_config.bind_addr());
    println!(
        "📖 OpenAPI document available at http://{}/api-docs/openapi.json",
        server_config.bind_addr()
    );
    axum::serve(listener, app).await.unwrap();
}

async fn handle_create_admin(args: Vec<String>) {
    if args.len() != 5 {
        eprintln!("Usage: {} create-admin <username> <email> <password>", args[0]);
        std::process::exit(1);
    }

    let username = &args[2];
    let email = &args[3];
    let password = &args[4];

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    match create_admin(&pool, username, email, password).await {
        Ok(_) => {
            println!("✅ Super User created successfully!");
            println!("   Username: {}", username);
            println!("   Email: {}", email);
        }
        Err(e) => {
            eprintln!("❌ Error creating Super User: {}", e);
            std::process::exit(1);
        }
    }
}

async fn create_admin(
    pool: &sqlx::PgPool,
    username: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    if password.len() < 6 {
        anyhow::bail!("Password must be at least 6 characters long");
    }

    let hashed = hash_password(password).map_err(|e| anyhow::anyhow!("{}", e.error))?;

    // No explicit permission map: Super User bypasses the resolver anyway.
    sqlx::query(
        "INSERT INTO users (username, email, password, role, is_active)
         VALUES ($1, $2, $3, $4, TRUE)",
    )
    .bind(username)
    .bind(email)
    .bind(&hashed)
    .bind(Role::SuperUser.as_str())
    .execute(pool)
    .await?;

    Ok(())
}
