use crate::error::Result;
use crate::events::DomainEvent;
use std::fs::File;
use std::path::Path;

/// Export format types
#[derive(Debug, Clone)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Export decoded events to a file
pub fn export_events<P: AsRef<Path>>(
    events: &[DomainEvent],
    path: P,
    format: ExportFormat,
) -> Result<()> {
    match format {
        ExportFormat::Csv => export_events_csv(events, path),
        ExportFormat::Json => export_events_json(events, path),
    }
}

fn export_events_csv<P: AsRef<Path>>(events: &[DomainEvent], path: P) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(["block_number", "transaction_hash", "kind", "details"])?;

    for event in events {
        let details = serde_json::to_string(&event.data)?;
        writer.write_record([
            event.block_number.to_string(),
            event.transaction_hash.clone(),
            event.kind.to_string(),
            details,
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn export_events_json<P: AsRef<Path>>(events: &[DomainEvent], path: P) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, events)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventData, EventKind};

    fn sample_events() -> Vec<DomainEvent> {
        vec![DomainEvent {
            kind: EventKind::EnergyPurchased,
            block_number: 1200,
            transaction_hash: "0xfeed".to_string(),
            data: EventData::EnergyPurchased {
                buyer: "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".to_string(),
                seller: "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb".to_string(),
                energy_amount: "2500".to_string(),
                price: "180000000000000000".to_string(),
            },
        }]
    }

    #[test]
    fn test_export_json_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");

        export_events(&sample_events(), &path, ExportFormat::Json).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<DomainEvent> = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, sample_events());
    }

    #[test]
    fn test_export_csv_has_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.csv");

        export_events(&sample_events(), &path, ExportFormat::Csv).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "block_number,transaction_hash,kind,details"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("1200,0xfeed,EnergyPurchased,"));
    }
}
