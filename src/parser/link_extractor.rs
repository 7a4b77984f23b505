use lopdf::{Dictionary, Document, Object};
use std::path::Path;
use tracing::{debug, info};

use crate::storage::LinkEntry;
use crate::utils::{CatalogError, CatalogResult};

pub struct LinkExtractor;

impl Default for LinkExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkExtractor {
    pub fn new() -> Self {
        Self
    }

    /// 提取PDF中所有 URI 链接注释，按页码顺序
    pub fn extract_links(&self, pdf_path: &Path) -> CatalogResult<Vec<LinkEntry>> {
        debug!("提取PDF链接: {}", pdf_path.display());

        if !pdf_path.exists() {
            return Err(CatalogError::Pdf(format!("PDF文件不存在: {}", pdf_path.display())));
        }

        let doc = Document::load(pdf_path)?;
        let links = self.links_in_document(&doc);
        debug!("链接提取完成，共 {} 个", links.len());
        Ok(links)
    }

    pub fn links_in_document(&self, doc: &Document) -> Vec<LinkEntry> {
        let mut links = Vec::new();

        // get_pages is keyed by 1-based page number
        for (page_num, page_id) in doc.get_pages() {
            let page = match doc.get_dictionary(page_id) {
                Ok(d) => d,
                Err(_) => continue,
            };
            for uri in self.page_uris(doc, page) {
                links.push(LinkEntry { page: page_num, uri });
            }
        }

        if links.is_empty() {
            info!("PDF中没有找到链接注释");
        }
        links
    }

    fn page_uris(&self, doc: &Document, page: &Dictionary) -> Vec<String> {
        let annots = match page
            .get(b"Annots")
            .ok()
            .and_then(|obj| resolve(doc, obj))
            .and_then(|obj| obj.as_array().ok())
        {
            Some(a) => a,
            None => return Vec::new(),
        };

        annots
            .iter()
            .filter_map(|annot| {
                let dict = resolve(doc, annot)?.as_dict().ok()?;
                let action = resolve(doc, dict.get(b"A").ok()?)?.as_dict().ok()?;
                let uri = resolve(doc, action.get(b"URI").ok()?)?;
                match uri {
                    Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
                    _ => None,
                }
            })
            .filter(|uri| !uri.is_empty())
            .collect()
    }
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

/// 带 BOM 的按 UTF-16BE 解码，否则按 UTF-8
pub fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    String::from_utf8_lossy(bytes).into_owned()
}
