use crate::output::{prettify_response_body, FormatItem, Outputter};
use crate::Response;
use anyhow::Result;
use std::io::Write;

pub struct FormattedOutputter<'a, W: Write> {
    writer: &'a mut W,
    response_format: Vec<FormatItem>,
}

impl<'a, W: Write> FormattedOutputter<'a, W> {
    pub fn new(writer: &'a mut W, response_format: Vec<FormatItem>) -> FormattedOutputter<'a, W> {
        FormattedOutputter {
            writer,
            response_format,
        }
    }
}

fn format_headers(headers: &[(String, String)]) -> String {
    headers
        .iter()
        .map(|(key, value)| format!("{}: {}\n", key, value))
        .collect()
}

impl<'a, W: Write> Outputter for FormattedOutputter<'a, W> {
    fn response(&mut self, response: &Response) -> Result<()> {
        let Response {
            status,
            headers,
            body,
            elapsed,
            ..
        } = response;

        for format_item in &self.response_format {
            let to_write = match format_item {
                FormatItem::StatusLine => status.clone(),
                FormatItem::Headers => format_headers(headers),
                FormatItem::Body => prettify_response_body(body),
                FormatItem::Elapsed => format!("{}ms", elapsed.as_millis()),
                FormatItem::Chars(s) => s.clone(),
            };

            self.writer.write_all(to_write.as_bytes())?;
        }
        Ok(())
    }
}
