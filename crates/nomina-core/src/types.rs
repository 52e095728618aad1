//! # Domain Types
//!
//! Core domain types used throughout Nómina.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Usuario      │   │    Empleado     │   │      Pago       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │◄──│  creado_por     │◄──│  empleado_id    │       │
//! │  │  correo         │   │  horas_trabaj.  │   │  horas_pagadas  │       │
//! │  │  contrasena*    │   │  salario        │   │  monto_pagado   │       │
//! │  │  rol            │   └────────▲────────┘   │  registrado_por │       │
//! │  └─────────────────┘            │            └─────────────────┘       │
//! │                        ┌────────┴────────┐   ┌─────────────────┐       │
//! │                        │    Contrato     │   │   Incapacidad   │       │
//! │                        │  empleado_id    │   │  empleado_id    │       │
//! │                        │  tipo, estado   │   │  dias           │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  * argon2 hash, never serialized                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Input vs. Entity
//! Every entity has a matching `Nuevo*` input type. Inputs keep required
//! fields as `Option` so a missing field surfaces as a
//! [`ValidationError::Required`] instead of a deserialization failure, and
//! are turned into entities by their `into_*` builders after validation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::payroll::periodo_de;
use crate::validation::{self, ValidationResult};

// =============================================================================
// Rol
// =============================================================================

/// Account role. `ADMIN` manages users; `USER` works with payroll data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Rol {
    Admin,
    #[default]
    User,
}

impl Rol {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Rol::Admin => "ADMIN",
            Rol::User => "USER",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Rol::Admin)
    }
}

impl fmt::Display for Rol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rol {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Rol::Admin),
            "USER" => Ok(Rol::User),
            _ => Err(ValidationError::InvalidFormat {
                field: "rol".to_string(),
                reason: "must be ADMIN or USER".to_string(),
            }),
        }
    }
}

// =============================================================================
// Usuario
// =============================================================================

/// A login account, including its password hash.
///
/// Never serialized: responses use [`UsuarioPublico`].
#[derive(Clone)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Usuario {
    pub id: String,
    pub nombre: String,
    pub correo: String,
    /// argon2 PHC string.
    pub contrasena: String,
    pub rol: Rol,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for Usuario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Usuario")
            .field("id", &self.id)
            .field("nombre", &self.nombre)
            .field("correo", &self.correo)
            .field("contrasena", &"<redacted>")
            .field("rol", &self.rol)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// A login account as exposed over the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct UsuarioPublico {
    pub id: String,
    pub nombre: String,
    pub correo: String,
    pub rol: Rol,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl From<Usuario> for UsuarioPublico {
    fn from(u: Usuario) -> Self {
        UsuarioPublico {
            id: u.id,
            nombre: u.nombre,
            correo: u.correo,
            rol: u.rol,
            created_at: u.created_at,
        }
    }
}

/// Registration / account creation input.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
pub struct NuevoUsuario {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub correo: Option<String>,
    #[serde(default)]
    pub contrasena: Option<String>,
    #[serde(default)]
    pub rol: Option<Rol>,
}

impl NuevoUsuario {
    pub fn validate(&self) -> ValidationResult<()> {
        validation::validate_required_text("nombre", self.nombre.as_deref())?;
        validation::validate_email(self.correo.as_deref().unwrap_or_default())?;
        validation::validate_password(self.contrasena.as_deref().unwrap_or_default())?;
        Ok(())
    }

    /// Builds the account from already-validated input and a password hash.
    ///
    /// `rol` is the effective role decided by the caller (registration
    /// downgrades non-admin requests to `USER`).
    pub fn into_usuario(
        self,
        contrasena_hash: String,
        rol: Rol,
        now: DateTime<Utc>,
    ) -> ValidationResult<Usuario> {
        self.validate()?;
        Ok(Usuario {
            id: Uuid::new_v4().to_string(),
            nombre: trimmed(self.nombre),
            correo: normalize_correo(&self.correo.unwrap_or_default()),
            contrasena: contrasena_hash,
            rol,
            created_at: now,
        })
    }
}

/// Role update input (`PUT /usuarios`).
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
pub struct ActualizarRol {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub rol: Option<Rol>,
}

impl ActualizarRol {
    /// Returns `(id, rol)` when both are present.
    pub fn validate(&self) -> ValidationResult<(&str, Rol)> {
        let id = self
            .id
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ValidationError::required("id"))?;
        let rol = self.rol.ok_or_else(|| ValidationError::required("rol"))?;
        Ok((id.trim(), rol))
    }
}

/// Login input.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
pub struct Credenciales {
    #[serde(default)]
    pub correo: Option<String>,
    #[serde(default)]
    pub contrasena: Option<String>,
}

impl Credenciales {
    /// Returns the normalized email and the password when both are present.
    pub fn validate(&self) -> ValidationResult<(String, &str)> {
        let correo = self
            .correo
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ValidationError::required("correo"))?;
        let contrasena = self
            .contrasena
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ValidationError::required("contrasena"))?;
        Ok((normalize_correo(correo), contrasena))
    }
}

// =============================================================================
// Empleado
// =============================================================================

/// An employee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Empleado {
    pub id: String,
    pub nombre: String,
    pub correo: Option<String>,
    pub cargo: Option<String>,
    pub salario: Option<i64>,
    #[ts(as = "Option<String>")]
    pub fecha_ingreso: Option<NaiveDate>,
    /// Remaining payable hours. Decremented by every payment.
    pub horas_trabajadas: i64,
    pub evaluacion_desempeno: Option<String>,
    pub creado_por: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// An employee together with the account that created it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EmpleadoDetalle {
    #[serde(flatten)]
    pub empleado: Empleado,
    pub creador: Option<UsuarioPublico>,
}

/// Employee creation input.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
pub struct NuevoEmpleado {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub correo: Option<String>,
    #[serde(default)]
    pub cargo: Option<String>,
    #[serde(default)]
    pub salario: Option<i64>,
    #[serde(default, deserialize_with = "fecha::opcional")]
    #[ts(as = "Option<String>")]
    pub fecha_ingreso: Option<NaiveDate>,
    #[serde(default)]
    pub horas_trabajadas: Option<i64>,
    #[serde(default)]
    pub evaluacion_desempeno: Option<String>,
    #[serde(default)]
    pub creado_por: Option<String>,
}

impl NuevoEmpleado {
    pub fn validate(&self) -> ValidationResult<()> {
        validation::validate_required_text("nombre", self.nombre.as_deref())?;
        if let Some(correo) = self.correo.as_deref().filter(|c| !c.trim().is_empty()) {
            validation::validate_email(correo)?;
        }
        validation::validate_optional_text("cargo", self.cargo.as_deref())?;
        if let Some(salario) = self.salario {
            validation::validate_money("salario", salario)?;
        }
        if let Some(horas) = self.horas_trabajadas {
            validation::validate_non_negative("horas_trabajadas", horas)?;
        }
        Ok(())
    }

    /// Builds the employee. `creado_por` falls back to `caller_id`.
    pub fn into_empleado(self, caller_id: &str, now: DateTime<Utc>) -> ValidationResult<Empleado> {
        self.validate()?;
        Ok(Empleado {
            id: Uuid::new_v4().to_string(),
            nombre: trimmed(self.nombre),
            correo: non_empty(self.correo).map(|c| normalize_correo(&c)),
            cargo: non_empty(self.cargo),
            salario: self.salario,
            fecha_ingreso: self.fecha_ingreso,
            horas_trabajadas: self.horas_trabajadas.unwrap_or(0),
            evaluacion_desempeno: non_empty(self.evaluacion_desempeno),
            creado_por: non_empty(self.creado_por).or_else(|| Some(caller_id.to_string())),
            created_at: now,
        })
    }
}

// =============================================================================
// Contrato
// =============================================================================

/// An employment contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Contrato {
    pub id: String,
    pub empleado_id: String,
    pub tipo: String,
    #[ts(as = "String")]
    pub fecha_inicio: NaiveDate,
    #[ts(as = "Option<String>")]
    pub fecha_fin: Option<NaiveDate>,
    pub salario: i64,
    pub estado: String,
    pub observaciones: Option<String>,
    pub registrado_por: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A contract together with its employee.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ContratoDetalle {
    #[serde(flatten)]
    pub contrato: Contrato,
    pub empleado: Option<Empleado>,
}

/// Contract creation input.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
pub struct NuevoContrato {
    #[serde(default)]
    pub empleado_id: Option<String>,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default, deserialize_with = "fecha::opcional")]
    #[ts(as = "Option<String>")]
    pub fecha_inicio: Option<NaiveDate>,
    #[serde(default, deserialize_with = "fecha::opcional")]
    #[ts(as = "Option<String>")]
    pub fecha_fin: Option<NaiveDate>,
    #[serde(default)]
    pub salario: Option<i64>,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub observaciones: Option<String>,
    #[serde(default)]
    pub registrado_por: Option<String>,
}

impl NuevoContrato {
    pub fn validate(&self) -> ValidationResult<()> {
        validation::validate_required_id("empleado_id", self.empleado_id.as_deref())?;
        validation::validate_required_text("tipo", self.tipo.as_deref())?;
        let inicio = self
            .fecha_inicio
            .ok_or_else(|| ValidationError::required("fecha_inicio"))?;
        if let Some(fin) = self.fecha_fin {
            validation::validate_date_range(inicio, fin)?;
        }
        let salario = self
            .salario
            .ok_or_else(|| ValidationError::required("salario"))?;
        validation::validate_money("salario", salario)?;
        validation::validate_required_text("estado", self.estado.as_deref())?;
        validation::validate_long_text("observaciones", self.observaciones.as_deref())?;
        Ok(())
    }

    /// Builds the contract. `registrado_por` falls back to `caller_id`.
    pub fn into_contrato(self, caller_id: &str, now: DateTime<Utc>) -> ValidationResult<Contrato> {
        self.validate()?;
        Ok(Contrato {
            id: Uuid::new_v4().to_string(),
            empleado_id: trimmed(self.empleado_id),
            tipo: trimmed(self.tipo),
            fecha_inicio: self
                .fecha_inicio
                .ok_or_else(|| ValidationError::required("fecha_inicio"))?,
            fecha_fin: self.fecha_fin,
            salario: self.salario.unwrap_or_default(),
            estado: trimmed(self.estado),
            observaciones: non_empty(self.observaciones),
            registrado_por: non_empty(self.registrado_por)
                .or_else(|| Some(caller_id.to_string())),
            created_at: now,
        })
    }
}

// =============================================================================
// Incapacidad
// =============================================================================

/// A medical / disability leave record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Incapacidad {
    pub id: String,
    pub empleado_id: String,
    pub tipo: String,
    pub motivo: String,
    #[ts(as = "String")]
    pub fecha_inicio: NaiveDate,
    #[ts(as = "String")]
    pub fecha_fin: NaiveDate,
    pub dias_incapacidad: i32,
    pub registrado_por: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A leave record with its employee and the account that registered it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IncapacidadDetalle {
    #[serde(flatten)]
    pub incapacidad: Incapacidad,
    pub empleado: Option<Empleado>,
    pub registrador: Option<UsuarioPublico>,
}

/// Leave creation input. Every field is mandatory.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
pub struct NuevaIncapacidad {
    #[serde(default)]
    pub empleado_id: Option<String>,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub motivo: Option<String>,
    #[serde(default, deserialize_with = "fecha::opcional")]
    #[ts(as = "Option<String>")]
    pub fecha_inicio: Option<NaiveDate>,
    #[serde(default, deserialize_with = "fecha::opcional")]
    #[ts(as = "Option<String>")]
    pub fecha_fin: Option<NaiveDate>,
    #[serde(default)]
    pub dias_incapacidad: Option<i32>,
    #[serde(default)]
    pub registrado_por: Option<String>,
}

impl NuevaIncapacidad {
    pub fn validate(&self) -> ValidationResult<()> {
        validation::validate_required_id("empleado_id", self.empleado_id.as_deref())?;
        validation::validate_required_text("tipo", self.tipo.as_deref())?;
        validation::validate_required_text("motivo", self.motivo.as_deref())?;
        let inicio = self
            .fecha_inicio
            .ok_or_else(|| ValidationError::required("fecha_inicio"))?;
        let fin = self
            .fecha_fin
            .ok_or_else(|| ValidationError::required("fecha_fin"))?;
        let dias = self
            .dias_incapacidad
            .ok_or_else(|| ValidationError::required("dias_incapacidad"))?;
        validation::validate_required_id("registrado_por", self.registrado_por.as_deref())?;
        validation::validate_date_range(inicio, fin)?;
        validation::validate_leave_days(dias, inicio, fin)?;
        Ok(())
    }

    pub fn into_incapacidad(self, now: DateTime<Utc>) -> ValidationResult<Incapacidad> {
        self.validate()?;
        Ok(Incapacidad {
            id: Uuid::new_v4().to_string(),
            empleado_id: trimmed(self.empleado_id),
            tipo: trimmed(self.tipo),
            motivo: trimmed(self.motivo),
            fecha_inicio: self
                .fecha_inicio
                .ok_or_else(|| ValidationError::required("fecha_inicio"))?,
            fecha_fin: self
                .fecha_fin
                .ok_or_else(|| ValidationError::required("fecha_fin"))?,
            dias_incapacidad: self.dias_incapacidad.unwrap_or_default(),
            registrado_por: trimmed(self.registrado_por),
            created_at: now,
        })
    }
}

// =============================================================================
// Pago
// =============================================================================

/// A payroll payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Pago {
    pub id: String,
    pub empleado_id: String,
    pub mes: i32,
    pub anio: i32,
    #[ts(as = "String")]
    pub fecha_pago: NaiveDate,
    pub monto_pagado: i64,
    pub metodo_pago: String,
    pub horas_pagadas: i64,
    pub observaciones: Option<String>,
    pub registrado_por_id: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A payment with its employee and the account that registered it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PagoDetalle {
    #[serde(flatten)]
    pub pago: Pago,
    pub empleado: Option<Empleado>,
    pub registrador: Option<UsuarioPublico>,
}

/// Payment creation input.
///
/// `registrado_por_id` is not accepted from the body: it always comes from
/// the authenticated caller.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
pub struct NuevoPago {
    #[serde(default)]
    pub empleado_id: Option<String>,
    #[serde(default)]
    pub mes: Option<i32>,
    #[serde(default)]
    pub anio: Option<i32>,
    #[serde(default, deserialize_with = "fecha::opcional")]
    #[ts(as = "Option<String>")]
    pub fecha_pago: Option<NaiveDate>,
    #[serde(default)]
    pub monto_pagado: Option<i64>,
    #[serde(default)]
    pub metodo_pago: Option<String>,
    #[serde(default)]
    pub horas_pagadas: Option<i64>,
    #[serde(default)]
    pub observaciones: Option<String>,
}

impl NuevoPago {
    pub fn validate(&self) -> ValidationResult<()> {
        validation::validate_required_id("empleado_id", self.empleado_id.as_deref())?;
        let horas = self
            .horas_pagadas
            .ok_or_else(|| ValidationError::required("horas_pagadas"))?;
        validation::validate_positive("horas_pagadas", horas)?;
        if let Some(monto) = self.monto_pagado {
            validation::validate_money("monto_pagado", monto)?;
        }
        if let Some(mes) = self.mes {
            validation::validate_month(mes)?;
        }
        if let Some(anio) = self.anio {
            validation::validate_year(anio)?;
        }
        validation::validate_optional_text("metodo_pago", self.metodo_pago.as_deref())?;
        validation::validate_long_text("observaciones", self.observaciones.as_deref())?;
        Ok(())
    }

    /// Builds the payment row.
    ///
    /// `fecha_pago` defaults to the date of `now`; `mes`/`anio` default to
    /// the period of `fecha_pago`.
    pub fn into_pago(self, registrado_por_id: &str, now: DateTime<Utc>) -> ValidationResult<Pago> {
        self.validate()?;
        let fecha_pago = self.fecha_pago.unwrap_or_else(|| now.date_naive());
        let (mes, anio) = periodo_de(fecha_pago);
        Ok(Pago {
            id: Uuid::new_v4().to_string(),
            empleado_id: trimmed(self.empleado_id),
            mes: self.mes.unwrap_or(mes),
            anio: self.anio.unwrap_or(anio),
            fecha_pago,
            monto_pagado: self.monto_pagado.unwrap_or(0),
            metodo_pago: non_empty(self.metodo_pago).unwrap_or_default(),
            horas_pagadas: self.horas_pagadas.unwrap_or_default(),
            observaciones: non_empty(self.observaciones),
            registrado_por_id: registrado_por_id.to_string(),
            created_at: now,
        })
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Emails are compared case-insensitively.
pub fn normalize_correo(correo: &str) -> String {
    correo.trim().to_lowercase()
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Tolerant date parsing for request bodies.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (the browser's
/// `toISOString()`), naive `YYYY-MM-DDTHH:MM:SS`, `null` and `""`.
pub mod fecha {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer};

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.date_naive());
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|ts| ts.date())
    }

    pub fn opcional<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => parse(value).map(Some).ok_or_else(|| {
                serde::de::Error::custom(format!("invalid date '{}'", value))
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_rol_serde() {
        assert_eq!(serde_json::to_string(&Rol::Admin).unwrap(), "\"ADMIN\"");
        let rol: Rol = serde_json::from_str("\"USER\"").unwrap();
        assert_eq!(rol, Rol::User);
        assert_eq!("admin".parse::<Rol>().unwrap(), Rol::Admin);
        assert!("root".parse::<Rol>().is_err());
        assert_eq!(Rol::default(), Rol::User);
    }

    #[test]
    fn test_usuario_debug_redacts_hash() {
        let usuario = Usuario {
            id: "u1".to_string(),
            nombre: "Ana".to_string(),
            correo: "ana@example.com".to_string(),
            contrasena: "$argon2id$secret".to_string(),
            rol: Rol::User,
            created_at: now(),
        };
        let debug = format!("{:?}", usuario);
        assert!(!debug.contains("secret"));

        let publico = UsuarioPublico::from(usuario);
        let json = serde_json::to_value(&publico).unwrap();
        assert!(json.get("contrasena").is_none());
        assert_eq!(json["rol"], "USER");
    }

    #[test]
    fn test_fecha_accepts_iso_timestamp() {
        let json = r#"{"empleado_id":"e1","horas_pagadas":8,"fecha_pago":"2025-02-03T15:04:05.000Z"}"#;
        let input: NuevoPago = serde_json::from_str(json).unwrap();
        assert_eq!(input.fecha_pago, NaiveDate::from_ymd_opt(2025, 2, 3));

        let json = r#"{"nombre":"Ana","correo":"a@b.co","fecha_ingreso":""}"#;
        let input: NuevoEmpleado = serde_json::from_str(json).unwrap();
        assert_eq!(input.fecha_ingreso, None);

        let json = r#"{"empleado_id":"e1","horas_pagadas":8,"fecha_pago":"ayer"}"#;
        assert!(serde_json::from_str::<NuevoPago>(json).is_err());
    }

    #[test]
    fn test_nuevo_pago_derives_period() {
        let input = NuevoPago {
            empleado_id: Some("emp-1".to_string()),
            horas_pagadas: Some(40),
            monto_pagado: Some(800_000),
            metodo_pago: Some("transferencia".to_string()),
            ..Default::default()
        };
        let pago = input.into_pago("user-1", now()).unwrap();
        assert_eq!(pago.fecha_pago, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        assert_eq!((pago.mes, pago.anio), (3, 2025));
        assert_eq!(pago.registrado_por_id, "user-1");
        assert_eq!(pago.horas_pagadas, 40);
    }

    #[test]
    fn test_nuevo_pago_requires_hours() {
        let input = NuevoPago {
            empleado_id: Some("emp-1".to_string()),
            ..Default::default()
        };
        assert_eq!(
            input.validate(),
            Err(ValidationError::required("horas_pagadas"))
        );
    }

    #[test]
    fn test_nuevo_empleado_defaults() {
        let input = NuevoEmpleado {
            nombre: Some("  Carlos Pérez ".to_string()),
            correo: Some("Carlos@Example.com".to_string()),
            cargo: Some("".to_string()),
            ..Default::default()
        };
        let empleado = input.into_empleado("admin-1", now()).unwrap();
        assert_eq!(empleado.nombre, "Carlos Pérez");
        assert_eq!(empleado.correo.as_deref(), Some("carlos@example.com"));
        assert_eq!(empleado.cargo, None);
        assert_eq!(empleado.horas_trabajadas, 0);
        assert_eq!(empleado.creado_por.as_deref(), Some("admin-1"));
    }

    #[test]
    fn test_nuevo_empleado_correo_is_optional() {
        let sin_correo = NuevoEmpleado {
            nombre: Some("Ana".to_string()),
            horas_trabajadas: Some(10),
            ..Default::default()
        };
        let empleado = sin_correo.into_empleado("u1", now()).unwrap();
        assert_eq!(empleado.correo, None);
        assert_eq!(empleado.horas_trabajadas, 10);

        let en_blanco = NuevoEmpleado {
            nombre: Some("Ana".to_string()),
            correo: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(en_blanco.into_empleado("u1", now()).unwrap().correo, None);

        let invalido = NuevoEmpleado {
            nombre: Some("Ana".to_string()),
            correo: Some("no-es-correo".to_string()),
            ..Default::default()
        };
        assert!(invalido.validate().is_err());
    }

    #[test]
    fn test_nueva_incapacidad_requires_every_field() {
        let input = NuevaIncapacidad {
            empleado_id: Some("emp-1".to_string()),
            tipo: Some("enfermedad".to_string()),
            motivo: Some("gripe".to_string()),
            fecha_inicio: NaiveDate::from_ymd_opt(2025, 1, 10),
            fecha_fin: NaiveDate::from_ymd_opt(2025, 1, 12),
            dias_incapacidad: Some(3),
            registrado_por: None,
        };
        assert_eq!(
            input.validate(),
            Err(ValidationError::required("registrado_por"))
        );
    }

    #[test]
    fn test_credenciales_validate() {
        let creds = Credenciales {
            correo: Some(" Admin@Nomina.co ".to_string()),
            contrasena: Some("secreto123".to_string()),
        };
        let (correo, contrasena) = creds.validate().unwrap();
        assert_eq!(correo, "admin@nomina.co");
        assert_eq!(contrasena, "secreto123");

        let creds = Credenciales {
            correo: Some("admin@nomina.co".to_string()),
            contrasena: None,
        };
        assert!(creds.validate().is_err());
    }

    #[test]
    fn test_detalle_flattens() {
        let empleado = Empleado {
            id: "e1".to_string(),
            nombre: "Ana".to_string(),
            correo: None,
            cargo: None,
            salario: Some(2_500_000),
            fecha_ingreso: None,
            horas_trabajadas: 160,
            evaluacion_desempeno: None,
            creado_por: None,
            created_at: now(),
        };
        let detalle = EmpleadoDetalle {
            empleado,
            creador: None,
        };
        let json = serde_json::to_value(&detalle).unwrap();
        assert_eq!(json["id"], "e1");
        assert_eq!(json["horas_trabajadas"], 160);
        assert_eq!(json["salario"], 2_500_000);
        assert!(json["creador"].is_null());
    }
}
