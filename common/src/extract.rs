//! モデル応答からSVGフラグメントを抽出
//!
//! 抽出方針:
//! 1. 最初の `<svg` から直後の `</svg>` まで（非貪欲、1件のみ）
//! 2. 見つからなければ応答全体をそのまま返す
//!
//! 上流の出力が崩れているのは想定内なので、2はエラーではなく明示的なフォールバック。

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SVG_FRAGMENT: Regex = Regex::new(r"(?s)<svg.*?</svg>").expect("valid svg pattern");
}

/// 抽出結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction<'a> {
    /// `<svg ...>...</svg>` が見つかった
    Fragment(&'a str),
    /// 見つからなかったので応答全体
    Passthrough(&'a str),
}

impl<'a> Extraction<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Extraction::Fragment(s) | Extraction::Passthrough(s) => s,
        }
    }

    pub fn is_fragment(&self) -> bool {
        matches!(self, Extraction::Fragment(_))
    }

    pub fn into_owned(self) -> String {
        self.as_str().to_string()
    }
}

/// 応答テキストからSVGマークアップを抽出
///
/// # Examples
/// ```
/// use svg_genius_common::extract_markup;
///
/// let response = "Here is your SVG:\n<svg><circle/></svg>\nEnjoy!";
/// assert_eq!(extract_markup(response).as_str(), "<svg><circle/></svg>");
/// ```
pub fn extract_markup(response: &str) -> Extraction<'_> {
    match SVG_FRAGMENT.find(response) {
        Some(m) => Extraction::Fragment(m.as_str()),
        None => Extraction::Passthrough(response),
    }
}
