use crate::models::ScanRecord;
use csv::Writer;

const HEADER: [&str; 8] = [
    "barcode",
    "product",
    "category",
    "item_id",
    "variant_id",
    "counted",
    "remote_stock",
    "last_scanned_at",
];

/// 导出扫码记录为 CSV (未知库存留空)
pub fn export_to_csv(records: &[ScanRecord]) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for record in records {
        let identity = &record.product.identity;
        writer.write_record([
            record.scan_code.clone(),
            record.product.name.clone(),
            record.product.category.clone(),
            identity.item_id.to_string(),
            identity
                .variant_id
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_default(),
            record.counted_quantity.to_string(),
            record
                .product
                .remote_stock
                .map(|s| s.to_string())
                .unwrap_or_default(),
            record.last_scanned_at.to_rfc3339(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}
