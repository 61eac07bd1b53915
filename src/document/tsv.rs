use super::{Row, Table};

/// Read tab-separated blocks. Blank lines separate blocks; a block is a
/// table only if at least one of its lines contains a tab.
pub(super) fn read_tables(raw: &str) -> Vec<Table> {
    let mut tables = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in raw.lines() {
        if line.trim().is_empty() {
            flush_block(&mut block, &mut tables);
        } else {
            block.push(line);
        }
    }
    flush_block(&mut block, &mut tables);

    tables
}

fn flush_block(block: &mut Vec<&str>, tables: &mut Vec<Table>) {
    if block.iter().any(|line| line.contains('\t')) {
        tables.push(read_block(&block.join("\n")));
    }
    block.clear();
}

/// One block as a table. Rows may differ in length, and quotes are plain text.
fn read_block(text: &str) -> Table {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes());

    let rows = reader
        .records()
        .filter_map(|record| match record {
            Ok(record) => Some(Row::new(
                record.iter().map(|field| field.trim().to_string()).collect(),
            )),
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable row");
                None
            }
        })
        .collect();

    Table::new(rows)
}
