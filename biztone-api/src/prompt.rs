//! System instruction construction
//!
//! One template for all audiences. The audience profile fills in role,
//! register and style; the closing rules are the same for every audience.

use biztone_common::config::{CompletionConfig, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use biztone_common::{api::ConversionRequest, Audience};

use crate::completion::{ChatMessage, CompletionRequest};

/// Fixed sampling parameters sent with every completion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl From<&CompletionConfig> for SamplingParams {
    fn from(config: &CompletionConfig) -> Self {
        Self {
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

/// Render the system instruction for `audience`
pub fn system_instruction(audience: Audience) -> String {
    let profile = audience.profile();
    format!(
        "당신은 비즈니스 커뮤니케이션 전문가입니다. \
         입력된 텍스트를 {role}에게 전달하기 적합한 {register} 문장으로 변환해 주세요. \
         {instruction}\n\n\
         규칙:\n\
         1. 반드시 한국어로만 답변하세요.\n\
         2. 인사말이나 설명 없이 변환된 결과 텍스트만 출력하세요.\n\
         3. 원문의 의도와 핵심 내용을 그대로 유지하세요.",
        role = profile.role,
        register = profile.register,
        instruction = profile.instruction,
    )
}

/// Two-message exchange: system instruction, then the trimmed input
pub fn completion_request(request: &ConversionRequest, params: SamplingParams) -> CompletionRequest {
    CompletionRequest {
        messages: vec![
            ChatMessage::system(system_instruction(request.target())),
            ChatMessage::user(request.text()),
        ],
        temperature: params.temperature,
        max_tokens: params.max_tokens,
    }
}
