//! Placeholder compilation for WordprocessingML parts
//!
//! Word freely splits text into runs, so `{student_id}` can arrive as
//! `{stu</w:t></w:r><w:r><w:t>dent_id}`. Compilation runs in three passes:
//!
//! 1. merge split tags by dropping the markup inside `{ … }`
//! 2. widen loops to the table row or paragraphs that hold their tags
//! 3. parse the result into a [`Node`] tree

use serde_json::{Map, Value};

/// Markup inserted for a line break inside a value
const LINE_BREAK: &str = r#"</w:t><w:br/><w:t xml:space="preserve">"#;

/// Compiled template fragment
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Markup copied verbatim
    Raw(String),
    /// `{name}`
    Var(String),
    /// `{#name}` … `{/name}`
    Loop { name: String, body: Vec<Node> },
}

#[derive(Debug, Clone, PartialEq)]
enum TagKind {
    Var(String),
    Open(String),
    Close(String),
}

#[derive(Debug, Clone, PartialEq)]
struct TagSpan {
    start: usize,
    end: usize,
    kind: TagKind,
}

/// Compiles one XML part into a node tree
pub fn compile(xml: &str) -> Result<Vec<Node>, String> {
    let merged = merge_split_tags(xml)?;
    let expanded = expand_loops(&merged)?;
    parse_nodes(&expanded)
}

/// Renders a node tree against a data map
pub fn render_nodes<'a>(
    nodes: &[Node],
    scopes: &mut Vec<&'a Map<String, Value>>,
    out: &mut String,
) -> Result<(), String> {
    for node in nodes {
        match node {
            Node::Raw(xml) => out.push_str(xml),
            Node::Var(name) => {
                let value =
                    lookup(scopes, name).ok_or_else(|| format!("unresolved tag {{{name}}}"))?;
                out.push_str(&format_value(name, value)?);
            }
            Node::Loop { name, body } => {
                let value =
                    lookup(scopes, name).ok_or_else(|| format!("unresolved loop {{#{name}}}"))?;
                let items = value
                    .as_array()
                    .ok_or_else(|| format!("loop {{#{name}}} expects a list"))?;
                for item in items {
                    match item.as_object() {
                        Some(scope) => {
                            scopes.push(scope);
                            let rendered = render_nodes(body, scopes, out);
                            scopes.pop();
                            rendered?;
                        }
                        None => render_nodes(body, scopes, out)?,
                    }
                }
            }
        }
    }
    Ok(())
}

fn lookup<'a>(scopes: &[&'a Map<String, Value>], name: &str) -> Option<&'a Value> {
    scopes.iter().rev().find_map(|scope| scope.get(name))
}

fn format_value(name: &str, value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(to_wordml_text(s)),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(_) | Value::Object(_) => {
            Err(format!("tag {{{name}}} refers to a list or object"))
        }
    }
}

/// Escapes a value for a `<w:t>` element, turning newlines into breaks
pub fn to_wordml_text(value: &str) -> String {
    value
        .replace("\r\n", "\n")
        .split('\n')
        .map(escape_xml)
        .collect::<Vec<_>>()
        .join(LINE_BREAK)
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Text content of an XML fragment with all markup removed
fn strip_markup(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut in_markup = false;
    for c in fragment.chars() {
        match c {
            '<' => in_markup = true,
            '>' => in_markup = false,
            _ if !in_markup => out.push(c),
            _ => {}
        }
    }
    out
}

fn merge_split_tags(xml: &str) -> Result<String, String> {
    let bytes = xml.as_bytes();
    let mut out = String::with_capacity(xml.len());
    let mut last = 0;
    let mut in_markup = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'<' => in_markup = true,
            b'>' => in_markup = false,
            b'{' if !in_markup => {
                let close = find_tag_close(bytes, i)?;
                let name = strip_markup(&xml[i + 1..close]);
                out.push_str(&xml[last..i]);
                out.push('{');
                out.push_str(name.trim());
                out.push('}');
                last = close + 1;
                i = close + 1;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    out.push_str(&xml[last..]);
    Ok(out)
}

/// Index of the `}` closing the tag opened at `open`, skipping markup
fn find_tag_close(bytes: &[u8], open: usize) -> Result<usize, String> {
    let mut in_markup = false;
    for (j, b) in bytes.iter().enumerate().skip(open + 1) {
        match b {
            b'<' => in_markup = true,
            b'>' => in_markup = false,
            b'{' if !in_markup => break,
            b'}' if !in_markup => return Ok(j),
            _ => {}
        }
    }
    Err(format!("unclosed tag starting at byte {open}"))
}

fn scan_tags(xml: &str) -> Result<Vec<TagSpan>, String> {
    let bytes = xml.as_bytes();
    let mut tags = Vec::new();
    let mut in_markup = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'<' => in_markup = true,
            b'>' => in_markup = false,
            b'{' if !in_markup => {
                let close = find_tag_close(bytes, i)?;
                let body = xml[i + 1..close].trim();
                let kind = classify(body)?;
                tags.push(TagSpan {
                    start: i,
                    end: close + 1,
                    kind,
                });
                i = close + 1;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    Ok(tags)
}

fn classify(body: &str) -> Result<TagKind, String> {
    let name = body.trim_start_matches(['#', '/']).trim();
    if name.is_empty() {
        return Err("empty tag {}".to_string());
    }
    let name = name.to_string();
    Ok(match body.chars().next() {
        Some('#') => TagKind::Open(name),
        Some('/') => TagKind::Close(name),
        _ => TagKind::Var(name),
    })
}

/// Pairs loop tags, returning `(open, close)` in order of the open tag
fn pair_loops(tags: &[TagSpan]) -> Result<Vec<(TagSpan, TagSpan)>, String> {
    let mut stack: Vec<&TagSpan> = Vec::new();
    let mut pairs = Vec::new();
    for tag in tags {
        match &tag.kind {
            TagKind::Open(_) => stack.push(tag),
            TagKind::Close(name) => {
                let open = stack
                    .pop()
                    .ok_or_else(|| format!("loop {{/{name}}} was never opened"))?;
                if let TagKind::Open(open_name) = &open.kind {
                    if open_name != name {
                        return Err(format!(
                            "loop {{#{open_name}}} is closed by {{/{name}}}"
                        ));
                    }
                }
                pairs.push((open.clone(), tag.clone()));
            }
            TagKind::Var(_) => {}
        }
    }
    if let Some(open) = stack.pop() {
        if let TagKind::Open(name) = &open.kind {
            return Err(format!("loop {{#{name}}} is never closed"));
        }
    }
    pairs.sort_by_key(|(open, _)| open.start);
    Ok(pairs)
}

fn expand_loops(xml: &str) -> Result<String, String> {
    let mut current = xml.to_string();
    loop {
        let pairs = pair_loops(&scan_tags(&current)?)?;
        let next = pairs
            .iter()
            .find_map(|(open, close)| expand_pair(&current, open, close));
        match next {
            Some(expanded) => current = expanded,
            None => return Ok(current),
        }
    }
}

/// Widens one loop to its table row or paragraphs; `None` when it stays inline
fn expand_pair(xml: &str, open: &TagSpan, close: &TagSpan) -> Option<String> {
    let open_tag = &xml[open.start..open.end];
    let close_tag = &xml[close.start..close.end];

    // loop spans table cells: repeat the whole row
    if xml[open.end..close.start].contains("</w:tc>") {
        let row_open = enclosing(xml, open.start, open.end, &["<w:tr>", "<w:tr "], "</w:tr>");
        let row_close = enclosing(xml, close.start, close.end, &["<w:tr>", "<w:tr "], "</w:tr>");
        if let (Some((start, end)), Some(other)) = (row_open, row_close) {
            if other == (start, end) {
                return Some(format!(
                    "{}{}{}{}{}{}{}",
                    &xml[..start],
                    open_tag,
                    &xml[start..open.start],
                    &xml[open.end..close.start],
                    &xml[close.end..end],
                    close_tag,
                    &xml[end..]
                ));
            }
        }
    }

    // paragraph loop: each tag alone in its own paragraph
    let para_open = enclosing(xml, open.start, open.end, &["<w:p>", "<w:p "], "</w:p>")?;
    let para_close = enclosing(xml, close.start, close.end, &["<w:p>", "<w:p "], "</w:p>")?;
    if para_open == para_close {
        return None;
    }
    let alone = |(start, end): (usize, usize), tag: &str| strip_markup(&xml[start..end]).trim() == tag;
    if !alone(para_open, open_tag) || !alone(para_close, close_tag) {
        return None;
    }
    Some(format!(
        "{}{}{}{}{}",
        &xml[..para_open.0],
        open_tag,
        &xml[para_open.1..para_close.0],
        close_tag,
        &xml[para_close.1..]
    ))
}

/// Bounds of the innermost element around `[from, to)` with one of `starts` and `end_tag`
fn enclosing(
    xml: &str,
    from: usize,
    to: usize,
    starts: &[&str],
    end_tag: &str,
) -> Option<(usize, usize)> {
    let before = &xml[..from];
    let start = starts.iter().filter_map(|s| before.rfind(s)).max()?;
    if xml[start..from].contains(end_tag) {
        return None;
    }
    let end = to + xml[to..].find(end_tag)? + end_tag.len();
    let between = &xml[to..end];
    if starts.iter().any(|s| between.contains(s)) {
        return None;
    }
    Some((start, end))
}

fn parse_nodes(xml: &str) -> Result<Vec<Node>, String> {
    let tags = scan_tags(xml)?;
    let mut stack: Vec<(String, Vec<Node>)> = vec![(String::new(), Vec::new())];
    let mut last = 0;

    for tag in tags {
        let top = &mut stack.last_mut().ok_or("loop stack underflow")?.1;
        if tag.start > last {
            top.push(Node::Raw(xml[last..tag.start].to_string()));
        }
        match tag.kind {
            TagKind::Var(name) => top.push(Node::Var(name)),
            TagKind::Open(name) => stack.push((name, Vec::new())),
            TagKind::Close(name) => {
                if stack.len() == 1 {
                    return Err(format!("loop {{/{name}}} was never opened"));
                }
                let (open_name, body) = stack.pop().ok_or("loop stack underflow")?;
                if open_name != name {
                    return Err(format!("loop {{#{open_name}}} is closed by {{/{name}}}"));
                }
                let parent = &mut stack.last_mut().ok_or("loop stack underflow")?.1;
                parent.push(Node::Loop { name, body });
            }
        }
        last = tag.end;
    }

    if stack.len() != 1 {
        let name = stack.last().map(|(n, _)| n.clone()).unwrap_or_default();
        return Err(format!("loop {{#{name}}} is never closed"));
    }
    let (_, mut nodes) = stack.pop().ok_or("loop stack underflow")?;
    if last < xml.len() {
        nodes.push(Node::Raw(xml[last..].to_string()));
    }
    Ok(nodes)
}
