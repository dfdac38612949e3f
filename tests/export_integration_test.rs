use anyhow::Result;
use httpmock::prelude::*;
use salud_admin::core::export;
use salud_admin::domain::ports::Storage;
use salud_admin::{CollectingNotifier, EntityKind, EntityTableController, HttpBackend, LocalStorage};
use std::io::Read;
use tempfile::TempDir;
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn test_export_loaded_list_to_csv() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/indicadores-medioambientales");
        then.status(200).json_body(serde_json::json!([
            {"id": 1, "centro_id": 3, "consumo_energia": 1200.5, "fecha_registro": "2024-01-31"},
            {"id": 2, "centro_id": 4, "consumo_agua": null}
        ]));
    });

    let storage = LocalStorage::new(temp_dir.path());
    let table = EntityTableController::new(
        EntityKind::IndicadorMedioambiental,
        HttpBackend::new(server.base_url()),
        storage.clone(),
        CollectingNotifier::new(),
    );
    assert!(table.mount().await.is_success());

    let csv = export::export_csv(table.spec(), &table.records())?;
    let file_name = export::csv_file_name(table.spec());
    assert_ok!(storage.write_file(&file_name, &csv).await);

    let written = String::from_utf8(storage.read_file("indicador_medioambiental.csv").await?)?;
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("id,centro_id,consumo_energia,consumo_agua"));
    assert!(lines[1].starts_with("1,3,1200.5,,"));
    assert!(lines[1].contains("2024-01-31"));

    Ok(())
}

#[tokio::test]
async fn test_snapshot_of_several_entities() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/especialidades");
        then.status(200)
            .json_body(serde_json::json!([{"id": 1, "nombre": "Oftalmología"}]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/costos");
        then.status(200).json_body(serde_json::json!([
            {"id": 10, "centro_id": 1, "servicio_id": 2, "precio": 350, "moneda": "EUR"}
        ]));
    });

    let mut entries = Vec::new();
    for kind in [EntityKind::Especialidad, EntityKind::Costo] {
        let table = EntityTableController::new(
            kind,
            HttpBackend::new(server.base_url()),
            LocalStorage::new("."),
            CollectingNotifier::new(),
        );
        assert!(table.mount().await.is_success());
        entries.push((table.spec(), table.records()));
    }

    let bytes = export::snapshot_zip(&entries)?;
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))?;
    assert_eq!(archive.len(), 2);

    let mut costos = String::new();
    archive.by_name("costo.csv")?.read_to_string(&mut costos)?;
    assert!(costos.contains("10,1,2,350,EUR"));

    Ok(())
}

#[tokio::test]
async fn test_reading_missing_template_fails() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path());
    let template = EntityKind::Visita.spec().template();
    assert_err!(storage.read_file(&template.file_name).await);
}
