//! Pipe-delimited item tables.
//!
//! ```
//! use assetdesk_content::items::{looks_like_items, parse_items};
//!
//! let text = "|V.1|3|\n1|Sword|10\n2|Shield|8\n3|Bow|12\n4|Arrow|1\n5|Potion|5\n";
//! let headers = vec!["ID".to_string(), "Name".to_string(), "Price".to_string()];
//!
//! assert!(looks_like_items(text, Some(&headers)));
//! let table = parse_items(text, &headers);
//! assert_eq!(table.cell(1, "Name"), Some("Shield"));
//! ```

pub mod export;
pub mod headers;
pub mod parser;
pub mod table;

pub use export::{export_csv, export_csv_file, to_csv_string};
pub use headers::{
    HeaderMatch, find_matching_header, fit_to_columns, header_candidates, header_file_path,
    load_header_file, parse_header_line, save_header_file,
};
pub use parser::{
    generated_headers, is_metadata_line, is_record_start, looks_like_items, metadata_columns,
    parse_items, unknown_headers,
};
pub use table::{ItemTable, TIP_COLUMN};
