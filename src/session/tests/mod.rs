//! Test utilities and fake sources for session testing

use crate::error::{LookupError, Result};
use crate::source::DataSource;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};


/// In-memory source counting how often it was fetched
#[derive(Debug, Clone)]
pub struct CountingSource {
    text: Option<String>,
    fetches: Arc<AtomicUsize>,
}

impl CountingSource {
    /// Source returning the given sheet on every fetch
    pub fn new(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Source failing every fetch
    pub fn failing() -> Self {
        Self {
            text: None,
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl DataSource for CountingSource {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    async fn fetch(&self) -> Result<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.text
            .clone()
            .ok_or_else(|| LookupError::DataSourceNotFound {
                path: PathBuf::from("diem_thi.csv"),
            })
    }
}

/// Helper to create a sheet with one padded identifier
pub fn create_lookup_sheet() -> String {
    "SBD,HỌ VÀ TÊN,TIẾNG VIỆT,TOÁN HỌC\n\
     \" 00123 \",Nguyễn Văn A,250,280\n\
     00456,Trần Thị B,200,N/V\n"
        .to_string()
}
