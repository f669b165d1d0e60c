use crate::refs::{ObjectReferences, RefType};
use chrono::{DateTime, Datelike, FixedOffset, Local, Timelike};
use pdf_writer::{Date as PDate, Pdf, TextStr};

/// Document metadata written to the PDF info dictionary
#[derive(Debug, Clone)]
pub struct Info {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub author: Option<String>,
    /// When the document was produced. Defaults to the time the info block was created.
    pub created: DateTime<FixedOffset>,
}

impl Default for Info {
    fn default() -> Self {
        Info {
            title: None,
            subject: None,
            author: None,
            created: Local::now().fixed_offset(),
        }
    }
}

impl Info {
    /// Metadata for a sheet of address labels
    pub fn labels(label_count: usize) -> Info {
        Info {
            title: Some("Address labels".to_string()),
            subject: Some(format!("{label_count} address labels")),
            ..Info::default()
        }
    }

    /// Set the author of the info block, modifying `self`
    pub fn author<S: ToString>(&mut self, author: S) -> &mut Self {
        self.author = Some(author.to_string());
        self
    }

    /// Pin the creation date, e.g. to make output reproducible
    pub fn created_at(&mut self, created: DateTime<FixedOffset>) -> &mut Self {
        self.created = created;
        self
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.allocate(RefType::Info);
        let mut info = writer.document_info(id);

        if let Some(title) = &self.title {
            info.title(TextStr(title.as_str()));
        }
        if let Some(subject) = &self.subject {
            info.subject(TextStr(subject.as_str()));
        }
        if let Some(author) = &self.author {
            info.author(TextStr(author.as_str()));
        }
        info.creator(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " v",
            env!("CARGO_PKG_VERSION")
        )));
        info.creation_date(pdf_date(&self.created));
    }
}

fn pdf_date(at: &DateTime<FixedOffset>) -> PDate {
    let offset_minutes = at.offset().local_minus_utc() / 60;
    PDate::new(at.year() as u16)
        .month(at.month() as u8)
        .day(at.day() as u8)
        .hour(at.hour() as u8)
        .minute(at.minute() as u8)
        .second(at.second() as u8)
        .utc_offset_hour((offset_minutes / 60) as i8)
        .utc_offset_minute((offset_minutes % 60).unsigned_abs() as u8)
}
