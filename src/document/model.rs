//! Document Model Module
//!
//! 1つのタブ・1つの地域について構築される文書モデルの型定義。

/// 折りたたみセクション（"Start"〜"End"で区切られたネストテーブル）
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CollapsibleSection {
    /// ラベル（"Start"の直前の行のタイトル）
    pub label: String,

    /// ヘッダー行（"Start"行のセル、末尾の空セルを除去済み、空の場合はヘッダーなし）
    pub header: Vec<String>,

    /// データ行（"End"行を含む）
    pub data: Vec<Vec<String>>,
}

impl CollapsibleSection {
    /// 空でないデータ行
    pub fn visible_rows(&self) -> impl Iterator<Item = &Vec<String>> {
        self.data
            .iter()
            .filter(|row| row.iter().any(|c| !c.trim().is_empty()))
    }

    /// ヘッダーまたは表示可能なデータ行を持つかどうか
    pub fn has_content(&self) -> bool {
        !self.header.is_empty() || self.visible_rows().next().is_some()
    }
}

/// 折りたたみ抽出後の要素
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BlockItem<'a> {
    /// 生の行
    Row(&'a [String]),

    /// 折りたたみセクション
    Details(CollapsibleSection),
}

/// 仕様行の値
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SpecValue {
    /// `<br>`で結合されるテキスト値のリスト
    Text(Vec<String>),

    /// ネストテーブル
    Details(CollapsibleSection),
}

/// 仕様行（ヘッダーと値の組）
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SpecRow {
    pub header: String,
    pub value: SpecValue,
}

/// 注記
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NoteBlock {
    /// "note:"接頭辞を除去した本文
    pub text: String,
}

/// 仕様セクション
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SpecSection {
    /// セクションのタイトル（最初の暗黙セクションは`None`）
    pub title: Option<String>,
    pub rows: Vec<SpecRow>,
    pub notes: Vec<NoteBlock>,
}

impl SpecSection {
    /// タイトル・行・注記のいずれも持たないかどうか
    pub fn is_empty(&self) -> bool {
        self.title.as_deref().map_or(true, str::is_empty)
            && self.rows.is_empty()
            && self.notes.is_empty()
    }
}

/// お手入れストリームの要素
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CareEntry {
    /// 見出し
    Heading(String),

    /// 箇条書き
    List(Vec<String>),

    /// 注記
    Note(NoteBlock),
}

impl CareEntry {
    fn has_content(&self) -> bool {
        match self {
            CareEntry::Heading(text) => !text.trim().is_empty(),
            CareEntry::List(items) => items.iter().any(|item| !item.trim().is_empty()),
            CareEntry::Note(_) => true,
        }
    }
}

/// お手入れ情報
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CareBlock {
    pub entries: Vec<CareEntry>,
}

impl CareBlock {
    /// 空の要素を除いたエントリ
    pub fn visible_entries(&self) -> impl Iterator<Item = &CareEntry> {
        self.entries.iter().filter(|entry| entry.has_content())
    }

    pub fn is_empty(&self) -> bool {
        self.visible_entries().next().is_none()
    }
}

/// 1つのタブ・1つの地域の文書
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TabDocument {
    pub sections: Vec<SpecSection>,
    pub care: CareBlock,

    /// 列幅計算用のヘッダー文字数サンプル
    pub header_lengths: Vec<usize>,
}

impl TabDocument {
    /// 仕様の出力を持つかどうか
    pub fn has_specs(&self) -> bool {
        self.sections.iter().any(|section| !section.is_empty())
    }

    /// お手入れ情報の出力を持つかどうか
    pub fn has_care(&self) -> bool {
        !self.care.is_empty()
    }

    /// タブが出力に寄与するかどうか
    pub fn is_active(&self) -> bool {
        self.has_specs() || self.has_care()
    }
}
