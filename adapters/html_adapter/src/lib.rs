use std::io::Write;

use doi_core::domain::{DerivedLinks, Record};
use doi_core::ports::{PageWriter, Result};
use doi_core::utils::escape_html;

/// HTML page writer adapter implementation.
///
/// Each call writes its fragment straight to the underlying sink; nothing is
/// buffered here beyond what the sink itself buffers.
pub struct HtmlPageWriter<W: Write> {
    out: W,
}

impl<W: Write> HtmlPageWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn link(&mut self, label: &str, url: &str) -> Result<()> {
        let url = escape_html(url);
        write!(self.out, "<p>{label}: <a href=\"{url}\">{url}</a></p>")?;
        Ok(())
    }
}

impl<W: Write> PageWriter for HtmlPageWriter<W> {
    fn begin(&mut self, raw_path: &str) -> Result<()> {
        self.out.write_all(b"<!doctype html><html>\n")?;
        writeln!(self.out, "<p>URL path: {}</p>", escape_html(raw_path))?;
        Ok(())
    }

    fn invalid(&mut self) -> Result<()> {
        self.out.write_all(b"<p>Not valid!</p>")?;
        Ok(())
    }

    fn links(&mut self, links: &DerivedLinks) -> Result<()> {
        self.link("Sci-hub link", &links.mirror)?;
        self.out.write_all(b"\n")?;
        self.link("Crossref link", &links.resolver)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn record(&mut self, record: &Record) -> Result<()> {
        self.link("Url", &record.location_url)
    }

    fn finish(&mut self) -> Result<()> {
        self.out.write_all(b"</html>\n")?;
        self.out.flush()?;
        Ok(())
    }
}
