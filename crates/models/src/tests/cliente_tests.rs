use anyhow::Result;
use sea_orm::TransactionTrait;

use super::setup_test_db;
use crate::cliente;
use crate::errors::ModelError;

#[tokio::test]
async fn test_cliente_crud() -> Result<()> {
    let db = setup_test_db().await?;

    let created = cliente::create(&db, "123", "Ana", "Diaz").await?;
    assert_eq!(created.dni, "123");

    let found = cliente::find(&db, "123").await?.expect("created row");
    assert_eq!(found.nombre, "Ana");
    assert_eq!(found.apellido, "Diaz");

    let updated = cliente::update_names(&db, "123", "Anabel", "Diaz Ruiz").await?.expect("row exists");
    assert_eq!(updated.dni, "123");
    assert_eq!(updated.nombre, "Anabel");

    let removed = cliente::delete(&db, "123").await?.expect("row removed");
    assert_eq!(removed.apellido, "Diaz Ruiz");
    assert!(cliente::find(&db, "123").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_duplicate_dni_is_conflict() -> Result<()> {
    let db = setup_test_db().await?;
    cliente::create(&db, "777", "Ana", "Diaz").await?;

    let dup = cliente::create(&db, "777", "Otra", "Persona").await;
    assert!(matches!(dup, Err(ModelError::Conflict(_))));
    assert_eq!(cliente::list(&db).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_invalid_fields_never_stored() -> Result<()> {
    let db = setup_test_db().await?;
    let long = "x".repeat(31);

    for (dni, nombre, apellido) in [
        ("12", "Ana", "Diaz"),
        ("1234", "Ana", "Diaz"),
        ("123", "A", "Diaz"),
        ("123", "Ana", long.as_str()),
    ] {
        let res = cliente::create(&db, dni, nombre, apellido).await;
        assert!(matches!(res, Err(ModelError::Validation(_))), "{dni}/{nombre}/{apellido}");
    }
    assert!(cliente::list(&db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_missing_rows_report_none() -> Result<()> {
    let db = setup_test_db().await?;
    assert!(cliente::update_names(&db, "404", "Ana", "Diaz").await?.is_none());
    assert!(cliente::delete(&db, "404").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_rollback_discards_insert() -> Result<()> {
    let db = setup_test_db().await?;
    let txn = db.begin().await?;
    cliente::create(&txn, "555", "Ana", "Diaz").await?;
    txn.rollback().await?;
    assert!(cliente::find(&db, "555").await?.is_none());
    Ok(())
}

#[test]
fn test_length_rules_count_characters() {
    // multi-byte names are measured in characters, not bytes
    assert!(cliente::validate_name("nombre", "Ñu").is_ok());
    assert!(cliente::validate_name("nombre", &"é".repeat(30)).is_ok());
    assert!(cliente::validate_name("nombre", &"é".repeat(31)).is_err());
    assert!(cliente::validate_dni("ñ12").is_ok());
}
