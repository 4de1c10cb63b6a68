//! Open Screenplay Format document parser
//!
//! Streams `<document><para><style/><text>…</text></para></document>` and
//! collects one [`OsfParagraph`] per `<para>`. Unknown elements and
//! attributes are skipped. quick-xml never expands DTD-declared entities,
//! so external entities are not resolved.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use crate::error::{ImportError, Result};

/// One inline formatted run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OsfRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub size: Option<f32>,
}

/// One `<para>` element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OsfParagraph {
    pub base_style: Option<String>,
    pub alignment: Option<String>,
    /// Never empty after parsing
    pub runs: Vec<OsfRun>,
}

impl OsfParagraph {
    /// Concatenated run text
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

fn xml_error(e: impl std::fmt::Display) -> ImportError {
    ImportError::XmlParse(e.to_string())
}

/// Accumulates paragraphs across reader events.
#[derive(Default)]
struct ParagraphBuilder {
    paragraphs: Vec<OsfParagraph>,
    para: Option<OsfParagraph>,
    run: Option<OsfRun>,
}

impl ParagraphBuilder {
    fn open_para(&mut self) {
        // A nested <para> closes the previous one
        self.close_para();
        self.para = Some(OsfParagraph::default());
    }

    fn close_para(&mut self) {
        self.close_run();
        if let Some(mut para) = self.para.take() {
            if para.runs.is_empty() {
                para.runs.push(OsfRun::default());
            }
            self.paragraphs.push(para);
        }
    }

    fn apply_style(&mut self, element: &BytesStart<'_>) -> Result<()> {
        let Some(para) = self.para.as_mut() else {
            return Ok(());
        };
        for attr in element.attributes() {
            let attr = attr.map_err(xml_error)?;
            let value = attr.unescape_value().map_err(xml_error)?;
            match attr.key.as_ref() {
                b"basestyle" => para.base_style = Some(value.into_owned()),
                b"align" => para.alignment = Some(value.into_owned()),
                _ => {}
            }
        }
        Ok(())
    }

    fn open_run(&mut self, element: &BytesStart<'_>) -> Result<()> {
        self.close_run();
        if self.para.is_none() {
            return Ok(());
        }
        let mut run = OsfRun::default();
        for attr in element.attributes() {
            let attr = attr.map_err(xml_error)?;
            let value = attr.unescape_value().map_err(xml_error)?;
            match attr.key.as_ref() {
                b"bold" => run.bold = value.trim() == "1",
                b"italic" => run.italic = value.trim() == "1",
                b"underline" => run.underline = value.trim() == "1",
                b"size" => run.size = value.trim().parse::<f32>().ok(),
                _ => {}
            }
        }
        self.run = Some(run);
        Ok(())
    }

    fn close_run(&mut self) {
        if let Some(run) = self.run.take()
            && let Some(para) = self.para.as_mut()
        {
            para.runs.push(run);
        }
    }

    fn append_text(&mut self, text: &str) {
        if let Some(run) = self.run.as_mut() {
            run.text.push_str(text);
        }
    }
}

/// Parse an OSF XML document into paragraphs, in document order.
///
/// # Errors
///
/// [`ImportError::XmlParse`] for malformed XML, including a document that
/// ends inside an open `<para>`.
pub fn parse_osf(xml: &[u8]) -> Result<Vec<OsfParagraph>> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(false);

    let mut builder = ParagraphBuilder::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_error)? {
            Event::Start(e) => match e.name().as_ref() {
                b"para" => builder.open_para(),
                b"style" => builder.apply_style(&e)?,
                b"text" => builder.open_run(&e)?,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"para" => {
                    builder.open_para();
                    builder.close_para();
                }
                b"style" => builder.apply_style(&e)?,
                b"text" => {
                    builder.open_run(&e)?;
                    builder.close_run();
                }
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"para" => builder.close_para(),
                b"text" => builder.close_run(),
                _ => {}
            },
            Event::Text(t) => {
                let text = t.unescape().map_err(xml_error)?;
                builder.append_text(&text);
            }
            Event::CData(c) => {
                let raw = c.into_inner();
                builder.append_text(&String::from_utf8_lossy(&raw));
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if builder.para.is_some() {
        return Err(ImportError::XmlParse(
            "document ended inside an open <para>".to_string(),
        ));
    }

    debug!(paragraphs = builder.paragraphs.len(), "parsed OSF document");
    Ok(builder.paragraphs)
}
