use uuid::Uuid;

/// 兑换码长度
pub const TOKEN_CODE_LEN: usize = 12;

/// 生成 12 位大写十六进制兑换码（取 UUID v4 去掉连字符后的前 12 位）
pub fn generate_token_code() -> String {
    Uuid::new_v4().simple().to_string()[..TOKEN_CODE_LEN].to_ascii_uppercase()
}

/// 规范化用户输入的兑换码：去掉首尾空白并转大写
pub fn normalize_token_code(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}
