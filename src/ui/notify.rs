// Reestructura - ui/notify.rs
//
// Outcome notification. The pipeline core knows nothing about presentation;
// callers pick a `Notifier` implementation. The desktop build uses native
// modal dialogs, and the console implementation serves headless targets and
// tests.
//
// Dialog text is Spanish, matching the tool's audience. Three failure
// shapes are distinguished for the user: input workbook not found, required
// column missing, and everything else as an unexpected error carrying the
// underlying message.

use crate::app::pipeline::PipelineOutcome;
use crate::util::error::{LoadError, LocateError, ReportError};

/// How a pipeline outcome reaches the user.
pub trait Notifier {
    fn report_success(&self, outcome: &PipelineOutcome);
    fn report_failure(&self, error: &ReportError);
}

// =============================================================================
// Message composition
// =============================================================================

fn success_message(outcome: &PipelineOutcome) -> String {
    format!(
        "¡Éxito! 🎉\n\nEl reporte '{}' ha sido generado en la misma carpeta.",
        outcome
            .output_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| outcome.output_path.display().to_string())
    )
}

/// Dialog title and body for a failed run.
fn failure_message(error: &ReportError) -> (&'static str, String) {
    match error {
        ReportError::Locate(LocateError::InputNotFound { pattern, .. }) => (
            "Error",
            format!(
                "No se encontró ningún archivo que coincida con el patrón '{pattern}'.\n\n\
                 Asegúrate de que el archivo de Excel esté en la misma carpeta que el ejecutable."
            ),
        ),
        ReportError::Load(LoadError::MissingColumn { column }) => (
            "Error de Columna",
            format!(
                "No se encontró la columna '{column}'.\n\n\
                 Verifica que los nombres de las columnas en tu archivo Excel sean los correctos."
            ),
        ),
        other => (
            "Error Inesperado",
            format!("Ocurrió un error inesperado:\n\n{other}"),
        ),
    }
}

// =============================================================================
// Implementations
// =============================================================================

/// Native modal dialogs. Blocks until the user dismisses the dialog.
pub struct DialogNotifier;

impl Notifier for DialogNotifier {
    fn report_success(&self, outcome: &PipelineOutcome) {
        let _ = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Info)
            .set_title("Proceso Completado")
            .set_description(success_message(outcome))
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }

    fn report_failure(&self, error: &ReportError) {
        let (title, message) = failure_message(error);
        let _ = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Error)
            .set_title(title)
            .set_description(message)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

/// Stderr notifications for headless environments.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn report_success(&self, outcome: &PipelineOutcome) {
        eprintln!("{}", success_message(outcome));
    }

    fn report_failure(&self, error: &ReportError) {
        let (title, message) = failure_message(error);
        eprintln!("{title}: {message}");
    }
}

// =============================================================================
// Tests
// =============================================================================
