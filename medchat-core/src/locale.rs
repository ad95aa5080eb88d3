//! User-facing strings for the supported locales.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

#[derive(Debug)]
pub struct Strings {
    pub welcome: &'static str,
    pub system_agent: &'static str,
    pub chat_error_prefix: &'static str,
    pub sources_heading: &'static str,
    pub thinking: &'static str,
    pub save_ok: &'static str,
    pub save_rejected: &'static str,
    pub save_failed: &'static str,
    pub reset_confirm: &'static str,
    pub reset_ok: &'static str,
    pub reset_rejected: &'static str,
    pub reset_failed: &'static str,
    pub debug_decision: &'static str,
    pub debug_execution: &'static str,
    pub debug_call: &'static str,
    pub debug_model: &'static str,
    pub debug_purpose: &'static str,
    pub debug_no_calls: &'static str,
}

static EN: Strings = Strings {
    welcome: "Hello! I'm your assistant. I can answer questions and offer useful information and advice. How can I help you?",
    system_agent: "system",
    chat_error_prefix: "Sorry, an error occurred: ",
    sources_heading: "Sources:",
    thinking: "Thinking...",
    save_ok: "Settings saved!",
    save_rejected: "Save failed: ",
    save_failed: "Failed to save settings: ",
    reset_confirm: "Reset to the default settings? This clears every customization.",
    reset_ok: "Settings reset to defaults!",
    reset_rejected: "Reset failed: ",
    reset_failed: "Failed to reset settings: ",
    debug_decision: "Decision:",
    debug_execution: "Executed by:",
    debug_call: "Call",
    debug_model: "Model",
    debug_purpose: "Purpose",
    debug_no_calls: "No LLM calls recorded",
};

static ZH: Strings = Strings {
    welcome: "您好!我是您的智能助手。我可以回答各种问题,提供有用的信息和建议。请问有什么可以帮助您的?",
    system_agent: "系统",
    chat_error_prefix: "抱歉,发生错误: ",
    sources_heading: "参考来源:",
    thinking: "正在思考中...",
    save_ok: "配置保存成功！",
    save_rejected: "保存失败: ",
    save_failed: "保存配置失败: ",
    reset_confirm: "确定要重置为默认配置吗？这将清除所有自定义设置。",
    reset_ok: "配置已重置为默认值！",
    reset_rejected: "重置失败: ",
    reset_failed: "重置配置失败: ",
    debug_decision: "决策结果:",
    debug_execution: "执行Agent:",
    debug_call: "调用",
    debug_model: "模型",
    debug_purpose: "用途",
    debug_no_calls: "暂无调用记录",
};

impl Locale {
    pub fn strings(self) -> &'static Strings {
        match self {
            Locale::En => &EN,
            Locale::Zh => &ZH,
        }
    }
}
