//! Пример: чтение CHN файла и вывод заголовка
//!
//! ```text
//! cargo run -p chn-core --example inspect_chn_file -- SP_BUFF.$$$
//! ```

use chn_core::read_chn_file;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "SP_BUFF.$$$".to_string());

    let record = read_chn_file(&path)?;
    let h = &record.header;

    println!("File      : {path}");
    println!("MCA       : {} (segment {})", h.mca_number, h.segment);
    println!(
        "Start     : {} {}",
        String::from_utf8_lossy(&h.start_date),
        String::from_utf8_lossy(&h.start_time)
    );
    println!("Live time : {:.2} s", h.livetime as f64 / 50.0);
    println!("Real time : {:.2} s", h.realtime as f64 / 50.0);
    println!(
        "Channels  : {} from {}",
        h.channel_count, h.channel_offset
    );
    println!("Counts    : {}", record.spectrum.total_counts());

    Ok(())
}
