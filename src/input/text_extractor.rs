//! Text extraction from various file formats

use crate::error::{JobMatcherError, Result};
use pulldown_cmark::{html, Parser};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::Read;
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            JobMatcherError::PdfExtraction(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(text)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        // UTF-8 first, latin-1 as a fallback for older exports
        match String::from_utf8(bytes) {
            Ok(text) => Ok(text),
            Err(e) => Ok(e.into_bytes().iter().map(|&b| b as char).collect()),
        }
    }
}

/// DOCX files are zip archives; the document body lives in word/document.xml.
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        extract_docx_text(&bytes).map_err(|e| match e {
            JobMatcherError::DocxExtraction(msg) => JobMatcherError::DocxExtraction(format!(
                "Failed to extract text from DOCX '{}': {}",
                path.display(),
                msg
            )),
            other => other,
        })
    }
}

fn extract_docx_text(bytes: &[u8]) -> Result<String> {
    let cursor = std::io::Cursor::new(bytes);
    let mut archive = zip::ZipArchive::new(cursor)
        .map_err(|e| JobMatcherError::DocxExtraction(format!("not a DOCX archive: {}", e)))?;

    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| JobMatcherError::DocxExtraction(format!("missing document body: {}", e)))?
        .read_to_string(&mut document_xml)?;

    let mut reader = Reader::from_str(&document_xml);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Text(t)) => {
                let text = t.decode().map_err(|e| {
                    JobMatcherError::DocxExtraction(format!("malformed document.xml: {}", e))
                })?;
                current.push_str(&text);
            }
            // Entity/character references are emitted as separate events; unescape them.
            Ok(Event::GeneralRef(r)) => {
                let name = r.decode().map_err(|e| {
                    JobMatcherError::DocxExtraction(format!("malformed document.xml: {}", e))
                })?;
                let entity = format!("&{};", name);
                let text = quick_xml::escape::unescape(&entity).map_err(|e| {
                    JobMatcherError::DocxExtraction(format!("malformed document.xml: {}", e))
                })?;
                current.push_str(&text);
            }
            // w:p closes a paragraph, w:br and w:tab are inline whitespace
            Ok(Event::End(tag)) if tag.name().as_ref() == b"w:p" => {
                let line = current.trim();
                if !line.is_empty() {
                    paragraphs.push(line.to_string());
                }
                current.clear();
            }
            Ok(Event::Empty(tag)) if tag.name().as_ref() == b"w:br" => current.push('\n'),
            Ok(Event::Empty(tag)) if tag.name().as_ref() == b"w:tab" => current.push(' '),
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(JobMatcherError::DocxExtraction(format!(
                    "malformed document.xml: {}",
                    e
                )))
            }
            _ => {}
        }
    }

    let line = current.trim();
    if !line.is_empty() {
        paragraphs.push(line.to_string());
    }

    Ok(paragraphs.join("\n"))
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        let text = self.html_to_text(&html_output);
        Ok(text)
    }
}

impl MarkdownExtractor {
    fn html_to_text(&self, html: &str) -> String {
        let text = html
            .replace("<br>", "\n")
            .replace("</p>", "\n\n")
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        let re = regex::Regex::new(r"<[^>]*>").unwrap();
        let clean_text = re.replace_all(&text, "");

        let lines: Vec<String> = clean_text
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut buf = std::io::Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            let options = zip::write::SimpleFileOptions::default();
            writer.start_file("word/document.xml", options).unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn test_docx_paragraphs_become_lines() {
        let xml = r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
    <w:p><w:r><w:t>Senior Software Engineer</w:t></w:r></w:p>
    <w:p><w:r><w:t></w:t></w:r></w:p>
  </w:body>
</w:document>"#;

        let text = extract_docx_text(&build_docx(xml)).unwrap();
        assert_eq!(text, "Jane Doe\nSenior Software Engineer");
    }

    #[test]
    fn test_docx_entities_are_unescaped() {
        let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>C&amp;D Engineering</w:t></w:r></w:p></w:body></w:document>"#;

        let text = extract_docx_text(&build_docx(xml)).unwrap();
        assert_eq!(text, "C&D Engineering");
    }

    #[test]
    fn test_docx_rejects_non_archive_bytes() {
        let result = extract_docx_text(b"definitely not a zip file");
        assert!(matches!(result, Err(JobMatcherError::DocxExtraction(_))));
    }

    #[test]
    fn test_markdown_html_stripping() {
        let extractor = MarkdownExtractor;
        let html = "<h1>Jane Doe</h1><p>Software Engineer &amp; Architect</p>";
        let text = extractor.html_to_text(html);

        assert!(text.contains("Jane Doe"));
        assert!(text.contains("Software Engineer & Architect"));
        assert!(!text.contains("<h1>"));
    }
}
