//! # Development seed
//!
//! ```text
//! cargo run -p nomina-api --bin seed
//! ```
//!
//! Creates an ADMIN account and a few sample employees in the configured
//! database. Safe to run repeatedly: existing records are left alone.
//!
//! - `SEED_ADMIN_CORREO` (default: admin@nomina.local)
//! - `SEED_ADMIN_PASSWORD` (default: admin12345)

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use tracing::info;

use nomina_api::auth::password::hash_password;
use nomina_api::{init_tracing, ApiConfig};
use nomina_core::{NuevoEmpleado, NuevoUsuario, Rol, UsuarioPublico};
use nomina_db::{Database, DbConfig};

/// (nombre, correo, cargo, salario, horas)
const EMPLEADOS: &[(&str, &str, &str, i64, i64)] = &[
    ("Juan Pérez", "juan.perez@nomina.local", "Analista", 2_800_000, 160),
    ("María Gómez", "maria.gomez@nomina.local", "Desarrolladora", 4_500_000, 176),
    ("Pedro López", "pedro.lopez@nomina.local", "Soporte", 2_100_000, 120),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ApiConfig::load().context("Failed to load configuration")?;
    if let Some(parent) = config.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db = Database::new(DbConfig::new(config.database_path.clone()))
        .await
        .context("Failed to open database")?;

    let admin = seed_admin(&db).await?;
    seed_empleados(&db, &admin).await?;

    db.close().await;
    info!("Seed complete");
    Ok(())
}

async fn seed_admin(db: &Database) -> anyhow::Result<UsuarioPublico> {
    let correo =
        std::env::var("SEED_ADMIN_CORREO").unwrap_or_else(|_| "admin@nomina.local".to_string());
    let contrasena =
        std::env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| "admin12345".to_string());

    if let Some(existing) = db.usuarios().get_by_correo(&correo).await? {
        info!(correo = %existing.correo, "Admin already present");
        return Ok(existing.into());
    }

    let hash = hash_password(&contrasena).map_err(|e| anyhow::anyhow!("hash failed: {e}"))?;
    let usuario = NuevoUsuario {
        nombre: Some("Administrador".to_string()),
        correo: Some(correo),
        contrasena: Some(contrasena),
        rol: Some(Rol::Admin),
    }
    .into_usuario(hash, Rol::Admin, Utc::now())?;

    let admin = db.usuarios().insert(&usuario).await?;
    info!(correo = %admin.correo, "Admin created");
    Ok(admin)
}

async fn seed_empleados(db: &Database, admin: &UsuarioPublico) -> anyhow::Result<()> {
    let existentes = db.empleados().list().await?;
    let fecha_ingreso = NaiveDate::from_ymd_opt(2024, 1, 15);

    for &(nombre, correo, cargo, salario, horas) in EMPLEADOS {
        if existentes
            .iter()
            .any(|e| e.correo.as_deref() == Some(correo))
        {
            continue;
        }

        let empleado = NuevoEmpleado {
            nombre: Some(nombre.to_string()),
            correo: Some(correo.to_string()),
            cargo: Some(cargo.to_string()),
            salario: Some(salario),
            fecha_ingreso,
            horas_trabajadas: Some(horas),
            ..Default::default()
        }
        .into_empleado(&admin.id, Utc::now())?;

        db.empleados().insert(&empleado).await?;
        info!(%nombre, horas, "Empleado created");
    }

    Ok(())
}
