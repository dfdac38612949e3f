//! Presentation of controller outcomes as dashboard notifications.

use crate::core::outcome::{Outcome, UploadFailure};
use crate::domain::model::{Notification, NotificationLevel};
use crate::domain::schema::EntitySpec;

pub const NO_FILE_SELECTED: &str = "Por favor, selecciona un archivo Excel";
pub const UPLOAD_SUCCEEDED: &str = "Archivo subido con éxito";
pub const SERVER_FAILURE: &str = "Error al procesar el archivo en el servidor.";
pub const CONNECTIVITY_FAILURE: &str =
    "No se pudo conectar con el servidor. Por favor, intenta más tarde.";

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn render(spec: &EntitySpec, outcome: &Outcome) -> Notification {
    let labels = &spec.labels;
    match outcome {
        Outcome::Loaded { count } => Notification::new(
            NotificationLevel::Success,
            format!(
                "{} {} correctamente ({} {})",
                capitalize(labels.plural),
                labels.agree("obtenid", true),
                count,
                if *count == 1 { "registro" } else { "registros" }
            ),
        ),
        Outcome::LoadFailed { .. } => Notification::new(
            NotificationLevel::Error,
            format!("Error al obtener {}", labels.definite_plural()),
        ),
        Outcome::Deleted { .. } => Notification::new(
            NotificationLevel::Success,
            format!(
                "{} {} exitosamente",
                capitalize(labels.singular),
                labels.agree("eliminad", false)
            ),
        ),
        Outcome::DeleteFailed { .. } => Notification::new(
            NotificationLevel::Error,
            format!("Error al eliminar {}", labels.definite_singular()),
        ),
        Outcome::FileSelected { file_name } => Notification::new(
            NotificationLevel::Info,
            format!("Archivo seleccionado: {}", file_name),
        ),
        Outcome::UploadSkipped => Notification::new(NotificationLevel::Warning, NO_FILE_SELECTED),
        Outcome::Uploaded { message } => Notification::new(
            NotificationLevel::Success,
            non_blank(message).unwrap_or(UPLOAD_SUCCEEDED),
        ),
        Outcome::UploadFailed(failure) => {
            let message = match failure {
                UploadFailure::Server { message, .. } => {
                    non_blank(message).unwrap_or(SERVER_FAILURE).to_string()
                }
                UploadFailure::Connectivity => CONNECTIVITY_FAILURE.to_string(),
                UploadFailure::Request { message } => format!("Error en la solicitud: {}", message),
            };
            Notification::new(NotificationLevel::Error, message)
        }
    }
}

/// 後端訊息為空白時改用預設文字
fn non_blank(message: &Option<String>) -> Option<&str> {
    message.as_deref().filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RecordId;
    use crate::domain::schema::EntityKind;

    #[test]
    fn test_load_messages_agree_in_gender() {
        let loaded = render(EntityKind::Visita.spec(), &Outcome::Loaded { count: 3 });
        assert_eq!(loaded.level, NotificationLevel::Success);
        assert_eq!(loaded.message, "Visitas obtenidas correctamente (3 registros)");

        let failed = render(
            EntityKind::Centro.spec(),
            &Outcome::LoadFailed {
                reason: "timeout".to_string(),
            },
        );
        assert_eq!(failed.level, NotificationLevel::Error);
        assert_eq!(failed.message, "Error al obtener los centros de salud");
    }

    #[test]
    fn test_delete_messages() {
        let spec = EntityKind::Paciente.spec();
        let deleted = render(spec, &Outcome::Deleted { id: RecordId::Int(1) });
        assert_eq!(deleted.message, "Paciente eliminado exitosamente");

        let failed = render(
            EntityKind::Especialidad.spec(),
            &Outcome::DeleteFailed {
                id: RecordId::Int(1),
                reason: "404".to_string(),
            },
        );
        assert_eq!(failed.message, "Error al eliminar la especialidad");
    }

    #[test]
    fn test_upload_messages() {
        let spec = EntityKind::Costo.spec();

        let skipped = render(spec, &Outcome::UploadSkipped);
        assert_eq!(skipped.level, NotificationLevel::Warning);
        assert_eq!(skipped.message, NO_FILE_SELECTED);

        let generic = render(spec, &Outcome::Uploaded { message: None });
        assert_eq!(generic.message, UPLOAD_SUCCEEDED);

        let server = render(
            spec,
            &Outcome::UploadFailed(UploadFailure::Server {
                status: 500,
                message: Some("X".to_string()),
            }),
        );
        assert_eq!(server.message, "X");

        let server_silent = render(
            spec,
            &Outcome::UploadFailed(UploadFailure::Server {
                status: 502,
                message: None,
            }),
        );
        assert_eq!(server_silent.message, SERVER_FAILURE);

        let request = render(
            spec,
            &Outcome::UploadFailed(UploadFailure::Request {
                message: "archivo ilegible".to_string(),
            }),
        );
        assert_eq!(request.message, "Error en la solicitud: archivo ilegible");
    }

    #[test]
    fn test_blank_backend_messages_use_defaults() {
        let spec = EntityKind::Centro.spec();

        let uploaded = render(
            spec,
            &Outcome::Uploaded {
                message: Some(String::new()),
            },
        );
        assert_eq!(uploaded.message, UPLOAD_SUCCEEDED);

        let server = render(
            spec,
            &Outcome::UploadFailed(UploadFailure::Server {
                status: 500,
                message: Some("   ".to_string()),
            }),
        );
        assert_eq!(server.message, SERVER_FAILURE);
    }
}
