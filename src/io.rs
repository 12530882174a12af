use crate::model::{OperatorId, ScheduleRow};
use crate::scheduler::Assignment;
use csv::WriterBuilder;
use std::io::Write;

/// Export CSV du planning: header `date,shift,operator`
pub fn write_schedule_csv<W: Write>(out: W, rows: &[ScheduleRow]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(false).from_writer(out);
    w.write_record(["date", "shift", "operator"])?;
    for row in rows {
        let [date, shift, operator] = row.cells();
        w.write_record([date.as_str(), shift.as_str(), operator.as_str()])?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV des comptes: header `operator,count`
pub fn write_counts_csv<W: Write>(out: W, counts: &[(OperatorId, u32)]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(false).from_writer(out);
    w.write_record(["operator", "count"])?;
    let mut buf = itoa::Buffer::new();
    for (name, count) in counts {
        w.write_record([name.as_str(), buf.format(*count)])?;
    }
    w.flush()?;
    Ok(())
}

pub fn export_schedule_csv(rows: &[ScheduleRow]) -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_schedule_csv(&mut buf, rows)?;
    Ok(buf)
}

pub fn export_counts_csv(counts: &[(OperatorId, u32)]) -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_counts_csv(&mut buf, counts)?;
    Ok(buf)
}

/// Export JSON (jolie mise en forme) : lignes, comptes, poids finaux.
pub fn export_assignment_json(assignment: &Assignment) -> anyhow::Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(assignment)?)
}
