//! Two-pass HTML rewrite for post enhancement.
//!
//! Pass one ([`scan`]) walks the page's tag stream and collects what the
//! enhancement needs: the visible text of the content container, its
//! h2/h3 headings (with any pre-existing ids), and the copy-link button.
//! Pass two ([`apply`]) re-emits the page with heading ids injected and the
//! reading time and table of contents placed into their target elements.
//!
//! The page is the site generator's own output, so it is well-formed enough
//! for a tag stream; the reader is still configured leniently (unmatched
//! end tags allowed, end-name checking off) and void elements never open a
//! nesting level.

use crate::config::PostConfig;
use crate::utils::html::{is_raw_text_element, is_void_element, unescape};
use anyhow::{Context, Result, bail};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::Cursor;

/// A heading discovered inside the content container, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHeading {
    /// 2 or 3.
    pub level: u8,
    /// Decoded visible text.
    pub text: String,
    /// Pre-existing id attribute, if any.
    pub id: Option<String>,
}

/// The copy-link button as found in the page.
#[derive(Debug, Clone)]
pub struct CopyLinkTarget {
    pub data_url: Option<String>,
    /// The button's visible label (may be empty).
    pub label: String,
}

/// Everything pass one learns about the page.
#[derive(Debug, Default)]
pub struct Scan {
    pub found_content: bool,
    pub word_count: usize,
    pub headings: Vec<RawHeading>,
    pub copy_link: Option<CopyLinkTarget>,
}

/// Read-only scan of the page.
pub fn scan(html: &str, config: &PostConfig) -> Result<Scan> {
    let mut reader = lenient_reader(html);

    let mut scan = Scan::default();
    let mut depth = 0usize;
    let mut container_at: Option<usize> = None;
    let mut raw_text_at: Option<usize> = None;
    let mut button_at: Option<usize> = None;
    let mut button_label = String::new();
    // (level, existing id, text buffer) of the heading being captured
    let mut heading: Option<(u8, Option<String>, String)> = None;
    let mut visible_text = String::new();

    loop {
        match reader.read_event().context("failed to parse page HTML")? {
            Event::Start(e) => {
                let tag = tag_name(e.name().as_ref());
                let void = is_void_element(&tag);
                if !void {
                    depth += 1;
                }

                if container_at.is_none() && has_class(&e, &config.content_class) {
                    container_at = Some(depth);
                    scan.found_content = true;
                } else if container_at.is_some()
                    && heading.is_none()
                    && let Some(level) = heading_level(&tag)
                {
                    heading = Some((level, attr(&e, "id"), String::new()));
                }

                if !void && raw_text_at.is_none() && is_raw_text_element(&tag) {
                    raw_text_at = Some(depth);
                }

                if scan.copy_link.is_none()
                    && attr(&e, "id").as_deref() == Some(config.copy_link_id.as_str())
                {
                    scan.copy_link = Some(CopyLinkTarget {
                        data_url: attr(&e, "data-url"),
                        label: String::new(),
                    });
                    if !void {
                        button_at = Some(depth);
                    }
                }
            }
            Event::Empty(e) => {
                // A self-closed button still carries its data-url
                if scan.copy_link.is_none()
                    && attr(&e, "id").as_deref() == Some(config.copy_link_id.as_str())
                {
                    scan.copy_link = Some(CopyLinkTarget {
                        data_url: attr(&e, "data-url"),
                        label: String::new(),
                    });
                }
            }
            Event::Text(t) => {
                let text = unescape(&String::from_utf8_lossy(&t)).into_owned();
                collect_text(
                    &text,
                    container_at.is_some() && raw_text_at.is_none(),
                    &mut visible_text,
                    &mut heading,
                    button_at.is_some().then_some(&mut button_label),
                );
            }
            Event::GeneralRef(r) => {
                // Entity references arrive as separate events; decode and
                // treat them as text.
                let entity = format!("&{};", String::from_utf8_lossy(&r));
                let text = unescape(&entity).into_owned();
                collect_text(
                    &text,
                    container_at.is_some() && raw_text_at.is_none(),
                    &mut visible_text,
                    &mut heading,
                    button_at.is_some().then_some(&mut button_label),
                );
            }
            Event::End(e) => {
                let tag = tag_name(e.name().as_ref());

                if let Some((level, _, _)) = &heading
                    && heading_level(&tag) == Some(*level)
                {
                    let (level, id, text) = heading.take().unwrap_or_default();
                    scan.headings.push(RawHeading {
                        level,
                        text: text.trim().to_string(),
                        id,
                    });
                }

                if !is_void_element(&tag) {
                    if raw_text_at == Some(depth) && is_raw_text_element(&tag) {
                        raw_text_at = None;
                    }
                    if button_at == Some(depth) {
                        button_at = None;
                        if let Some(target) = scan.copy_link.as_mut() {
                            target.label = button_label.trim().to_string();
                        }
                    }
                    if container_at == Some(depth) {
                        container_at = None;
                    }
                    depth = depth.saturating_sub(1);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    scan.word_count = visible_text.split_whitespace().count();
    Ok(scan)
}

/// Re-emit the page with heading ids injected, the reading time written
/// into its target element (replacing prior content), and the TOC appended
/// to its target element (preserving prior content).
///
/// `ids` must be the final heading ids in the order [`scan`] reported them.
pub fn apply(
    html: &str,
    config: &PostConfig,
    ids: &[String],
    reading_time: &str,
    toc_html: Option<&str>,
) -> Result<String> {
    let mut reader = lenient_reader(html);
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    let mut depth = 0usize;
    let mut container_at: Option<usize> = None;
    let mut heading_at: Option<usize> = None;
    let mut toc_end_at: Option<usize> = None;
    let mut heading_idx = 0usize;

    loop {
        match reader.read_event().context("failed to parse page HTML")? {
            Event::Start(e) => {
                let tag = tag_name(e.name().as_ref());
                let tag_raw = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                let void = is_void_element(&tag);
                if !void {
                    depth += 1;
                }

                let elem_id = attr(&e, "id");

                // Reading time replaces the target's existing content
                if elem_id.as_deref() == Some(config.reading_time_id.as_str()) && !void {
                    writer.write_event(Event::Start(e.to_owned()))?;
                    writer.write_event(Event::Text(BytesText::new(reading_time)))?;
                    skip_subtree(&mut reader)?;
                    writer.write_event(Event::End(BytesEnd::new(tag_raw)))?;
                    depth = depth.saturating_sub(1);
                    continue;
                }

                // The TOC is appended just before the target closes
                if toc_html.is_some() && elem_id.as_deref() == Some(config.toc_id.as_str()) && !void
                {
                    toc_end_at = Some(depth);
                }

                if container_at.is_none() && has_class(&e, &config.content_class) {
                    container_at = Some(depth);
                } else if container_at.is_some()
                    && heading_at.is_none()
                    && heading_level(&tag).is_some()
                {
                    if !void {
                        heading_at = Some(depth);
                    }
                    let id = ids.get(heading_idx);
                    heading_idx += 1;
                    if elem_id.is_none()
                        && let Some(id) = id
                    {
                        let mut owned = e.to_owned();
                        owned.push_attribute(("id", id.as_str()));
                        writer.write_event(Event::Start(owned))?;
                        continue;
                    }
                }

                writer.write_event(Event::Start(e))?;
            }
            Event::Empty(e) => {
                let elem_id = attr(&e, "id");
                let tag_raw = String::from_utf8_lossy(e.name().as_ref()).into_owned();

                // Self-closed targets are expanded so content fits inside
                if elem_id.as_deref() == Some(config.reading_time_id.as_str()) {
                    writer.write_event(Event::Start(e.to_owned()))?;
                    writer.write_event(Event::Text(BytesText::new(reading_time)))?;
                    writer.write_event(Event::End(BytesEnd::new(tag_raw)))?;
                    continue;
                }
                if let Some(toc) = toc_html
                    && elem_id.as_deref() == Some(config.toc_id.as_str())
                {
                    writer.write_event(Event::Start(e.to_owned()))?;
                    writer.write_event(Event::Text(BytesText::from_escaped(toc)))?;
                    writer.write_event(Event::End(BytesEnd::new(tag_raw)))?;
                    continue;
                }

                writer.write_event(Event::Empty(e))?;
            }
            Event::End(e) => {
                let tag = tag_name(e.name().as_ref());
                if !is_void_element(&tag) {
                    if toc_end_at == Some(depth)
                        && let Some(toc) = toc_html
                    {
                        writer.write_event(Event::Text(BytesText::from_escaped(toc)))?;
                        toc_end_at = None;
                    }
                    if heading_at == Some(depth) {
                        heading_at = None;
                    }
                    if container_at == Some(depth) {
                        container_at = None;
                    }
                    depth = depth.saturating_sub(1);
                }
                writer.write_event(Event::End(e))?;
            }
            Event::Eof => break,
            ev => writer.write_event(ev)?,
        }
    }

    String::from_utf8(writer.into_inner().into_inner()).context("rewritten page is not UTF-8")
}

// ============================================================================
// Helpers
// ============================================================================

/// Reader tuned for generator-produced HTML rather than strict XML.
fn lenient_reader(html: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(html);
    let cfg = reader.config_mut();
    cfg.check_end_names = false;
    cfg.allow_unmatched_ends = true;
    reader
}

/// Consume events until the element opened just before is closed.
fn skip_subtree(reader: &mut Reader<&[u8]>) -> Result<()> {
    let mut depth = 1usize;
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if !is_void_element(&tag_name(e.name().as_ref())) {
                    depth += 1;
                }
            }
            Event::End(e) => {
                if !is_void_element(&tag_name(e.name().as_ref())) {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
            }
            Event::Eof => bail!("unexpected end of page inside element"),
            _ => {}
        }
    }
}

/// Route decoded text to the buffers that are currently capturing.
fn collect_text(
    text: &str,
    in_visible_content: bool,
    visible_text: &mut String,
    heading: &mut Option<(u8, Option<String>, String)>,
    button_label: Option<&mut String>,
) {
    if in_visible_content {
        visible_text.push_str(text);
        if let Some((_, _, buf)) = heading {
            buf.push_str(text);
        }
    }
    if let Some(label) = button_label {
        label.push_str(text);
    }
}

/// Lowercased tag name.
fn tag_name(name: &[u8]) -> String {
    String::from_utf8_lossy(name).to_ascii_lowercase()
}

/// Heading nesting level for h2/h3 tags.
fn heading_level(tag: &str) -> Option<u8> {
    match tag {
        "h2" => Some(2),
        "h3" => Some(3),
        _ => None,
    }
}

/// Attribute value by (case-insensitive) name.
fn attr(e: &BytesStart, name: &str) -> Option<String> {
    e.html_attributes().flatten().find_map(|a| {
        a.key
            .as_ref()
            .eq_ignore_ascii_case(name.as_bytes())
            .then(|| String::from_utf8_lossy(&a.value).into_owned())
    })
}

/// Whether the element's class attribute contains the given class token.
fn has_class(e: &BytesStart, class: &str) -> bool {
    attr(e, "class").is_some_and(|c| c.split_whitespace().any(|t| t == class))
}

// ============================================================================
// Tests
// ============================================================================
