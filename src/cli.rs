use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "svg-genius")]
#[command(about = "AI Vector Studio: 自然言語の説明からSVGイラストを生成", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// プロンプトからSVGを生成（--modify で現在のSVGを修正）
    Generate {
        /// 生成したいイラストの説明
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,

        /// 最新の履歴のSVGを修正する
        #[arg(short, long)]
        modify: bool,

        /// 指定した履歴（番号またはID）のSVGを修正する
        #[arg(long, conflicts_with = "input")]
        from: Option<String>,

        /// 指定したSVGファイルを修正する
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// 出力SVGファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 生成結果をクリップボードにコピー
        #[arg(long)]
        copy: bool,

        /// illustration-<timestamp>.svg として保存するディレクトリ
        #[arg(long)]
        save_dir: Option<PathBuf>,
    },

    /// 生成履歴を表示/選択/削除
    History {
        /// 履歴を選択してSVGを出力（番号またはID）
        #[arg(short, long)]
        select: Option<String>,

        /// 履歴を全削除
        #[arg(long, conflicts_with = "select")]
        clear: bool,

        /// 確認なしで削除
        #[arg(short, long)]
        yes: bool,
    },

    /// SVGをプレビュー表示（省略時は最新）
    Show {
        /// 履歴の番号またはID
        id: Option<String>,

        /// 無害化せずにそのまま表示
        #[arg(long)]
        raw: bool,
    },

    /// SVGをクリップボードにコピー（省略時は最新）
    Copy {
        /// 履歴の番号またはID
        id: Option<String>,
    },

    /// SVGをファイルに保存（省略時は最新）
    Download {
        /// 履歴の番号またはID
        id: Option<String>,

        /// 保存先ディレクトリ（省略時はカレント）
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// 対話式スタジオ（生成と修正を繰り返す）
    Studio {
        /// 保存先ディレクトリ（省略時はカレント）
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from(["svg-genius", "generate", "a", "red", "fox", "--modify"]).unwrap();
        match cli.command {
            Commands::Generate { prompt, modify, from, .. } => {
                assert_eq!(prompt.join(" "), "a red fox");
                assert!(modify);
                assert!(from.is_none());
            }
            _ => panic!("Expected Generate"),
        }
    }

    #[test]
    fn test_generate_requires_prompt() {
        assert!(Cli::try_parse_from(["svg-genius", "generate"]).is_err());
    }

    #[test]
    fn test_history_clear_conflicts_with_select() {
        assert!(Cli::try_parse_from(["svg-genius", "history", "--clear", "--select", "1"]).is_err());
    }

    #[test]
    fn test_global_verbose() {
        let cli = Cli::try_parse_from(["svg-genius", "show", "-v", "--raw"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Show { raw: true, id: None }));
    }
}
