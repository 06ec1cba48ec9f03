// CSV encoding of the enriched table
use anyhow::Result;

pub fn write_csv(columns: &[String], rows: &[Vec<String>]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(columns)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush CSV buffer: {}", e.error()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_written_verbatim_and_quoted_when_needed() {
        let columns = vec!["Referência".to_string(), "Aferição - Sulco".to_string()];
        let rows = vec![
            vec!["P-001".to_string(), "5,0".to_string()],
            vec!["P-002".to_string(), String::new()],
        ];

        let bytes = write_csv(&columns, &rows).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "Referência,Aferição - Sulco\nP-001,\"5,0\"\nP-002,\n");
    }
}
