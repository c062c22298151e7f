//! SVGマークアップの無害化
//!
//! リモート由来のマークアップを描画面に渡す前に、要素と属性を許可リストで絞る。
//! - 許可されていない要素は子孫ごと削除（script, foreignObject, style など）
//! - イベントハンドラ属性（on*）と許可リスト外の属性は削除
//! - href は文書内参照（#id）のみ、url() も #id 参照のみ許可
//! - style 属性は宣言ごとに分解し、許可したプロパティと関数だけを残す
//! - 値の判定は XML 実体参照と CSS エスケープを展開してから行う
//! - コメント、処理命令、DOCTYPE は削除
//!
//! 整形式でないマークアップはエラー（描画側で表示不可として扱う）。

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// 描画を許可する要素
const ALLOWED_ELEMENTS: &[&str] = &[
    "svg", "g", "defs", "symbol", "use", "title", "desc",
    "path", "rect", "circle", "ellipse", "line", "polyline", "polygon",
    "text", "tspan", "textPath",
    "linearGradient", "radialGradient", "stop", "pattern",
    "clipPath", "mask", "marker",
    "filter", "feBlend", "feColorMatrix", "feComponentTransfer", "feComposite",
    "feDropShadow", "feFlood", "feFuncA", "feFuncB", "feFuncG", "feFuncR",
    "feGaussianBlur", "feMerge", "feMergeNode", "feMorphology", "feOffset",
    "feTurbulence", "feDisplacementMap",
];

/// 許可する属性
const ALLOWED_ATTRIBUTES: &[&str] = &[
    // 構造
    "id", "class", "style", "xmlns", "xmlns:xlink", "version", "role",
    "viewBox", "preserveAspectRatio", "width", "height", "x", "y",
    "x1", "x2", "y1", "y2", "cx", "cy", "r", "rx", "ry", "fx", "fy",
    "d", "points", "transform", "pathLength",
    "href", "xlink:href",
    // 塗り・線
    "fill", "fill-opacity", "fill-rule", "stroke", "stroke-width", "stroke-linecap",
    "stroke-linejoin", "stroke-dasharray", "stroke-dashoffset", "stroke-miterlimit",
    "stroke-opacity", "opacity", "color", "visibility", "display",
    "vector-effect", "shape-rendering", "paint-order",
    // グラデーション・パターン
    "offset", "stop-color", "stop-opacity", "gradientUnits", "gradientTransform",
    "spreadMethod", "patternUnits", "patternContentUnits", "patternTransform",
    // クリップ・マスク・マーカー
    "clip-path", "clip-rule", "clipPathUnits", "mask", "maskUnits", "maskContentUnits",
    "marker-start", "marker-mid", "marker-end", "markerWidth", "markerHeight",
    "markerUnits", "refX", "refY", "orient",
    // フィルタ
    "filter", "filterUnits", "primitiveUnits", "in", "in2", "result", "mode",
    "stdDeviation", "dx", "dy", "values", "type", "operator", "k1", "k2", "k3", "k4",
    "flood-color", "flood-opacity", "baseFrequency", "numOctaves", "seed",
    "stitchTiles", "scale", "xChannelSelector", "yChannelSelector", "radius",
    "tableValues", "slope", "intercept", "amplitude", "exponent",
    // テキスト
    "font-family", "font-size", "font-weight", "font-style", "letter-spacing",
    "word-spacing", "text-anchor", "dominant-baseline", "alignment-baseline",
    "text-decoration", "startOffset", "textLength", "lengthAdjust", "rotate",
    "xml:space",
];

/// style 属性で許可するプロパティ
const ALLOWED_STYLE_PROPERTIES: &[&str] = &[
    "fill", "fill-opacity", "fill-rule", "stroke", "stroke-width", "stroke-linecap",
    "stroke-linejoin", "stroke-dasharray", "stroke-dashoffset", "stroke-miterlimit",
    "stroke-opacity", "opacity", "color", "visibility", "display",
    "vector-effect", "shape-rendering", "paint-order", "mix-blend-mode", "isolation",
    "stop-color", "stop-opacity", "clip-path", "clip-rule", "mask",
    "marker-start", "marker-mid", "marker-end", "filter", "flood-color", "flood-opacity",
    "transform", "transform-origin", "transform-box",
    "font-family", "font-size", "font-weight", "font-style", "letter-spacing",
    "word-spacing", "text-anchor", "dominant-baseline", "text-decoration",
];

/// style の値で許可する関数（url は #id 参照のみ）
const ALLOWED_STYLE_FUNCTIONS: &[&str] = &[
    "url", "rgb", "rgba", "hsl", "hsla",
    "translate", "translatex", "translatey", "scale", "scalex", "scaley",
    "rotate", "skewx", "skewy", "matrix",
];

/// 属性値に現れたら拒否する関数（外部リソースを読み込めるもの）
const BLOCKED_FUNCTIONS: &[&str] = &[
    "image-set", "-webkit-image-set", "image", "cross-fade", "element", "src", "expression",
];

fn is_allowed_element(name: &str) -> bool {
    ALLOWED_ELEMENTS.contains(&name)
}

fn is_allowed_attribute(name: &str) -> bool {
    ALLOWED_ATTRIBUTES.contains(&name) || name.starts_with("aria-")
}

/// CSS エスケープ（`\72 ` や `\(`）を展開
fn decode_css_escapes(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let mut hex = String::new();
        while hex.len() < 6 {
            match chars.peek() {
                Some(h) if h.is_ascii_hexdigit() => {
                    hex.push(*h);
                    chars.next();
                }
                _ => break,
            }
        }
        if hex.is_empty() {
            if let Some(next) = chars.next() {
                out.push(next);
            }
            continue;
        }
        // 16進エスケープ直後の空白1つは区切り
        if chars.peek().is_some_and(|w| w.is_whitespace()) {
            chars.next();
        }
        let decoded = u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        out.push(decoded);
    }
    out
}

/// 値に現れる関数名（小文字）
fn function_names(value: &str) -> impl Iterator<Item = String> + '_ {
    let is_ident = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';
    value.match_indices('(').map(move |(pos, _)| {
        let head = &value[..pos];
        let start = head
            .char_indices()
            .rev()
            .find(|(_, c)| !is_ident(*c))
            .map_or(0, |(i, c)| i + c.len_utf8());
        head[start..].to_ascii_lowercase()
    })
}

/// url(...) が文書外を参照しているか
fn has_external_url(value: &str) -> bool {
    let lowered = value.to_ascii_lowercase();
    lowered.match_indices("url(").any(|(pos, _)| {
        let target = lowered[pos + 4..].trim_start_matches([' ', '"', '\'']);
        !target.starts_with('#')
    })
}

/// 属性値が安全か（value は実体参照を展開済み）
fn is_safe_value(name: &str, value: &str) -> bool {
    let css = decode_css_escapes(value);
    let compact: String = css
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    if compact.contains("javascript:") || compact.contains("expression(") {
        return false;
    }
    if name == "href" || name == "xlink:href" {
        return value.trim_start().starts_with('#');
    }
    !has_external_url(&css) && !function_names(&css).any(|f| BLOCKED_FUNCTIONS.contains(&f.as_str()))
}

/// style の1宣言の値が安全か
fn is_safe_style_value(value: &str) -> bool {
    let lowered = value.to_ascii_lowercase();
    let forbidden = ["@", "/*", "\\", "//", "javascript:", "expression", "http:", "https:"];
    if forbidden.iter().any(|f| lowered.contains(f)) {
        return false;
    }
    function_names(value).all(|f| ALLOWED_STYLE_FUNCTIONS.contains(&f.as_str()))
        && !has_external_url(value)
}

/// style 属性を宣言単位で絞り込む。残る宣言がなければ None
fn sanitize_style(value: &str) -> Option<String> {
    let decoded = decode_css_escapes(value);
    let kept: Vec<String> = decoded
        .split(';')
        .filter_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            let property = property.trim().to_ascii_lowercase();
            let value = value.trim();
            if !ALLOWED_STYLE_PROPERTIES.contains(&property.as_str()) || !is_safe_style_value(value) {
                tracing::debug!(declaration = %declaration.trim(), "style declaration removed");
                return None;
            }
            Some(format!("{property}: {value}"))
        })
        .collect();

    if kept.is_empty() {
        None
    } else {
        Some(kept.join("; "))
    }
}

fn escape_attribute(value: &str) -> String {
    value.replace('"', "&quot;").replace('<', "&lt;")
}

fn markup_error(e: impl std::fmt::Display) -> Error {
    Error::Markup(e.to_string())
}

/// 許可された属性のみで開始タグを書き出す
fn write_start_tag(out: &mut String, e: &BytesStart<'_>, name: &str, self_closing: bool) -> Result<()> {
    out.push('<');
    out.push_str(name);
    for attr in e.attributes() {
        let attr = attr.map_err(markup_error)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = String::from_utf8_lossy(&attr.value).into_owned();

        if key.to_ascii_lowercase().starts_with("on") || !is_allowed_attribute(&key) {
            tracing::debug!(attribute = %key, element = %name, "attribute removed");
            continue;
        }
        // 判定は実体参照を展開した値で行う
        let decoded = match quick_xml::escape::unescape(&value) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => {
                tracing::debug!(attribute = %key, element = %name, "undecodable attribute value removed");
                continue;
            }
        };
        let cleaned = if key == "style" {
            sanitize_style(&decoded).map(|style| quick_xml::escape::escape(style.as_str()).into_owned())
        } else if is_safe_value(&key, &decoded) {
            Some(escape_attribute(&value))
        } else {
            None
        };
        let Some(cleaned) = cleaned else {
            tracing::debug!(attribute = %key, element = %name, "unsafe attribute value removed");
            continue;
        };
        out.push(' ');
        out.push_str(&key);
        out.push_str("=\"");
        out.push_str(&cleaned);
        out.push('"');
    }
    out.push_str(if self_closing { "/>" } else { ">" });
    Ok(())
}

/// SVGマークアップを許可リストで無害化
///
/// # Returns
/// * `Ok(String)` - 無害化済みマークアップ
/// * `Err(Error::Markup)` - 整形式でない、またはルートが `<svg>` でない
pub fn sanitize_svg(markup: &str) -> Result<String> {
    let mut reader = Reader::from_str(markup);
    let mut out = String::with_capacity(markup.len());
    // 開いている要素の数
    let mut open = 0usize;
    // 削除中の要素の深さ（0なら出力中）
    let mut skip = 0usize;
    let mut seen_root = false;

    loop {
        match reader.read_event().map_err(markup_error)? {
            Event::Start(e) => {
                let qname = e.name();
                let name = String::from_utf8_lossy(qname.as_ref()).into_owned();
                if !seen_root && name != "svg" {
                    return Err(Error::Markup(format!("root element is <{name}>, expected <svg>")));
                }
                seen_root = true;
                open += 1;

                if skip > 0 {
                    skip += 1;
                } else if is_allowed_element(&name) {
                    write_start_tag(&mut out, &e, &name, false)?;
                } else {
                    tracing::debug!(element = %name, "element removed");
                    skip = 1;
                }
            }
            Event::Empty(e) => {
                let qname = e.name();
                let name = String::from_utf8_lossy(qname.as_ref()).into_owned();
                if !seen_root && name != "svg" {
                    return Err(Error::Markup(format!("root element is <{name}>, expected <svg>")));
                }
                seen_root = true;

                if skip == 0 {
                    if is_allowed_element(&name) {
                        write_start_tag(&mut out, &e, &name, true)?;
                    } else {
                        tracing::debug!(element = %name, "element removed");
                    }
                }
            }
            Event::End(e) => {
                if open == 0 {
                    return Err(Error::Markup("unexpected closing tag".into()));
                }
                open -= 1;

                if skip > 0 {
                    skip -= 1;
                } else {
                    let qname = e.name();
                    out.push_str("</");
                    out.push_str(&String::from_utf8_lossy(qname.as_ref()));
                    out.push('>');
                }
            }
            Event::Text(t) => {
                if skip == 0 && open > 0 {
                    out.push_str(&String::from_utf8_lossy(&t));
                }
            }
            Event::GeneralRef(r) => {
                if skip == 0 && open > 0 {
                    out.push('&');
                    out.push_str(&String::from_utf8_lossy(&r));
                    out.push(';');
                }
            }
            Event::CData(c) => {
                if skip == 0 && open > 0 {
                    let text = String::from_utf8_lossy(&c).into_owned();
                    out.push_str(&quick_xml::escape::escape(text.as_str()));
                }
            }
            Event::Eof => break,
            // コメント、XML宣言、処理命令、DOCTYPE は出力しない
            _ => {}
        }
    }

    if !seen_root {
        return Err(Error::Markup("no <svg> element found".into()));
    }
    if open != 0 {
        return Err(Error::Markup("unclosed element".into()));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_plain_svg() {
        let svg = r##"<svg viewBox="0 0 10 10" width="100%" height="100%"><circle cx="5" cy="5" r="4" fill="#ff0"/></svg>"##;
        assert_eq!(sanitize_svg(svg).unwrap(), svg);
    }

    #[test]
    fn test_removes_script_subtree() {
        let svg = r#"<svg><script>alert(1)</script><rect width="1"/></svg>"#;
        assert_eq!(sanitize_svg(svg).unwrap(), r#"<svg><rect width="1"/></svg>"#);
    }

    #[test]
    fn test_removes_foreign_object_with_children() {
        let svg = r#"<svg><foreignObject><div><p>hi</p></div></foreignObject><g></g></svg>"#;
        assert_eq!(sanitize_svg(svg).unwrap(), "<svg><g></g></svg>");
    }

    #[test]
    fn test_removes_event_handlers() {
        let svg = r#"<svg onload="steal()"><rect onclick="x()" width="2"/></svg>"#;
        assert_eq!(sanitize_svg(svg).unwrap(), r#"<svg><rect width="2"/></svg>"#);
    }

    #[test]
    fn test_href_only_fragment_refs() {
        let svg = r##"<svg><use href="#shape"/><use xlink:href="javascript:alert(1)"/><use href="https://evil.example/x.svg#a"/></svg>"##;
        assert_eq!(sanitize_svg(svg).unwrap(), r##"<svg><use href="#shape"/><use/><use/></svg>"##);
    }

    #[test]
    fn test_encoded_javascript_href_removed() {
        let svg = r#"<svg><use href="javascript&#58;alert(1)"/><rect fill="url(&#x68;ttp://x)"/></svg>"#;
        assert_eq!(sanitize_svg(svg).unwrap(), "<svg><use/><rect/></svg>");
    }

    #[test]
    fn test_url_references() {
        let svg = r#"<svg><rect fill="url(#grad)" filter="url(https://evil.example/f)"/></svg>"#;
        assert_eq!(sanitize_svg(svg).unwrap(), r#"<svg><rect fill="url(#grad)"/></svg>"#);
    }

    #[test]
    fn test_style_attribute_with_javascript_removed() {
        let svg = r#"<svg><rect style="fill: red"/><rect style="background: java script:x"/></svg>"#;
        // 空白を除いて判定する
        assert_eq!(
            sanitize_svg(svg).unwrap(),
            r#"<svg><rect style="fill: red"/><rect/></svg>"#
        );
    }

    #[test]
    fn test_style_css_escape_and_image_set_removed() {
        let svg = r#"<svg><rect style="fill: u\72 l(https://evil.example/beacon)"/><rect style="background-image: image-set('https://evil.example/b2' 1x)"/></svg>"#;
        let out = sanitize_svg(svg).unwrap();
        assert!(!out.contains("evil.example"));
        assert_eq!(out, "<svg><rect/><rect/></svg>");
    }

    #[test]
    fn test_style_keeps_allowed_declarations_only() {
        let svg = r##"<svg><rect style="fill: url(#g); stroke: rgb(0, 0, 0); background: red; fill-opacity: 0.5"/></svg>"##;
        assert_eq!(
            sanitize_style_output(svg),
            "fill: url(#g); stroke: rgb(0, 0, 0); fill-opacity: 0.5"
        );
    }

    #[test]
    fn test_style_rejects_import_comments_and_remote_refs() {
        for style in [
            "fill: red; @import 'https://evil.example/x.css'",
            "fill: u/**/rl(https://evil.example/x)",
            "filter: url(//evil.example/f)",
            "mask: url(\\#m)",
            "fill: var(--x)",
        ] {
            let svg = format!(r#"<svg><rect style="{style}"/></svg>"#);
            let out = sanitize_svg(&svg).unwrap();
            assert!(!out.contains("evil.example"), "{style} -> {out}");
            assert!(!out.contains("var("), "{style} -> {out}");
        }
        // 残る宣言があれば属性は残る
        let out = sanitize_svg(r#"<svg><rect style="fill: red; @import 'x'"/></svg>"#).unwrap();
        assert_eq!(out, r#"<svg><rect style="fill: red"/></svg>"#);
    }

    #[test]
    fn test_presentation_attribute_css_escape_removed() {
        let svg = r#"<svg><rect fill="u\72 l(https://evil.example/a)" filter="image-set('https://evil.example/b' 1x)" transform="rotate(45)"/></svg>"#;
        assert_eq!(sanitize_svg(svg).unwrap(), r#"<svg><rect transform="rotate(45)"/></svg>"#);
    }

    #[test]
    fn test_decode_css_escapes() {
        assert_eq!(decode_css_escapes("u\\72 l("), "url(");
        assert_eq!(decode_css_escapes("\\(x\\)"), "(x)");
        assert_eq!(decode_css_escapes("plain"), "plain");
    }

    fn sanitize_style_output(svg: &str) -> String {
        let out = sanitize_svg(svg).unwrap();
        let start = out.find("style=\"").expect("style 属性がない") + 7;
        let end = out[start..].find('"').unwrap() + start;
        out[start..end].to_string()
    }

    #[test]
    fn test_drops_comments_and_declaration() {
        let svg = "<?xml version=\"1.0\"?>\n<!-- sun --><svg><!-- body --><circle r=\"1\"/></svg>";
        assert_eq!(sanitize_svg(svg).unwrap(), "<svg><circle r=\"1\"/></svg>");
    }

    #[test]
    fn test_keeps_text_and_entities() {
        let svg = "<svg><text x=\"1\">Tom &amp; Jerry</text></svg>";
        assert_eq!(sanitize_svg(svg).unwrap(), svg);
    }

    #[test]
    fn test_unclosed_is_error() {
        assert!(matches!(sanitize_svg("<svg><g>"), Err(Error::Markup(_))));
    }

    #[test]
    fn test_mismatched_is_error() {
        assert!(sanitize_svg("<svg><g></svg>").is_err());
    }

    #[test]
    fn test_non_svg_root_is_error() {
        assert!(sanitize_svg("<div><svg></svg></div>").is_err());
        assert!(sanitize_svg("plain text from the model").is_err());
    }

    #[test]
    fn test_has_external_url() {
        assert!(!has_external_url("url(#a)"));
        assert!(!has_external_url("url( '#a' )"));
        assert!(has_external_url("url(http://x)"));
        assert!(has_external_url("url(#a) url(data:image/png;base64,AAA)"));
    }
}
