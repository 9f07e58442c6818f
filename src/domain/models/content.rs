use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use sqlx::types::Json;

/// Both singleton tables keep their only row under this id.
pub const SINGLETON_ID: i64 = 1;

/// Copy blocks of the landing page.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct HeroContent {
    pub main_title: String,
    pub main_subtitle: String,
    pub left_card_title: String,
    pub left_card_description: String,
    pub right_card_title: String,
    pub right_card_description: String,
    pub bottom_text: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for HeroContent {
    fn default() -> Self {
        Self {
            main_title: "小黑的奇幻岛屿".into(),
            main_subtitle: "在岩壁上寻找自由，在代码中构建万物".into(),
            left_card_title: "山海之息".into(),
            left_card_description: "在崎岖的岩壁上寻找自由的支点，在深邃的海底听见心跳的回响。".into(),
            right_card_title: "灯火之境".into(),
            right_card_description: "一盏复古台灯，一行跳动的代码，在寂静的深夜构建属于未来的碎片。".into(),
            bottom_text: "连接有趣的人，一起 Vibe Coding，一起坠入山海。".into(),
            updated_at: DateTime::<Utc>::default(),
        }
    }
}

/// The "soul collage" block of the about section.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub avatar_url: Option<String>,
    pub tags: Json<Vec<String>>,
    pub bio_paragraph_1: String,
    pub bio_paragraph_2: String,
    pub bio_quote: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "小黑".into(),
            avatar_url: Some("https://picsum.photos/seed/xiaohei/800/800".into()),
            tags: Json(
                ["北京", "攀岩者", "潜水员", "Vibe Coder", "活动主理人"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            ),
            bio_paragraph_1: "从印尼的浪尖到阳朔的洞穴，从读诗会的温润到搞砸俱乐部的坦诚。".into(),
            bio_paragraph_2: "我在这里创造一个让城市紧绷的人放松的场域。对我而言，代码与山海并无二致，它们都是通往自由的路径。".into(),
            bio_quote: "We are all fragments of a larger dream.".into(),
            updated_at: DateTime::<Utc>::default(),
        }
    }
}
