use tracing::warn;

use crate::domain::models::identity::IslandIdentity;
use crate::domain::ports::LlmService;
use crate::error::AppError;

pub const GENERATION_FAILED: &str = "生成失败，请稍后重试";
pub const MALFORMED_RESPONSE: &str = "AI 响应格式错误，请重试";

pub const SYSTEM_PROMPT: &str = r#"你是一位充满想象力的岛屿向导，专门为访客分配独特的岛屿身份。

你的任务是根据用户描述的性格和喜好，为他们生成一个专属的岛屿角色。

角色类型可以是：
- 陆地动物（如狐狸、鹿、兔子、猫头鹰等）
- 海洋生物（如海豚、水母、海龟、章鱼等）
- 天空生物（如鸟类、蝴蝶、蜻蜓等）
- 植物（如樱花树、仙人掌、蘑菇、藤蔓等）
- 岛屿物品（如灯塔、风铃、贝壳、漂流瓶等）
- 奇幻角色（如女巫、仙女、小精灵、守护者等）

请以 JSON 格式返回，包含以下字段：
{
  "role": "角色名称（中文，简短有诗意）",
  "type": "角色类型（动物/植物/物品/奇幻角色）",
  "description": "角色描述（50-80字，富有诗意和想象力，解释为什么这个角色适合用户）",
  "traits": ["特质1", "特质2", "特质3"],
  "emoji": "代表这个角色的emoji"
}

要求：
1. 角色要独特、有创意、富有诗意
2. 描述要温暖、治愈、充满想象力
3. 要紧密结合用户的性格特点
4. 语言风格要符合"小黑的奇幻岛屿"的氛围：自由、温暖、有趣、充满可能性
5. 只返回 JSON，不要有其他文字"#;

pub fn user_prompt(personality: &str) -> String {
    format!("我的性格和喜好：{}", personality.trim())
}

/// Removes a surrounding ```json / ``` fence from a model reply.
pub fn strip_code_fences(text: &str) -> &str {
    let mut cleaned = text.trim();
    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest.trim_start();
    } else if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest.trim_start();
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest.trim_end();
    }
    cleaned
}

pub fn parse_identity(reply: &str) -> Result<IslandIdentity, AppError> {
    serde_json::from_str(strip_code_fences(reply)).map_err(|e| {
        warn!("Model reply is not an identity: {}", reply);
        AppError::Upstream(MALFORMED_RESPONSE.into(), format!("Identity JSON error: {}", e))
    })
}

pub async fn generate_identity(
    llm: &dyn LlmService,
    api_key: &str,
    personality: &str,
) -> Result<IslandIdentity, AppError> {
    let reply = llm
        .generate(api_key, &user_prompt(personality), SYSTEM_PROMPT)
        .await
        .map_err(|e| AppError::Upstream(GENERATION_FAILED.into(), e.to_string()))?;

    if reply.trim().is_empty() {
        return Err(AppError::Upstream(GENERATION_FAILED.into(), "AI returned no content".into()));
    }

    parse_identity(&reply)
}
