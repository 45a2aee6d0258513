use std::env;
use std::str::FromStr;

/// 读取布尔型环境变量：支持 true/false/1/0（大小写不敏感）
pub fn env_is_true(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(v) => {
            let v = v.trim();
            v.eq_ignore_ascii_case("true") || v == "1"
        }
        Err(_) => default,
    }
}

/// 读取字符串环境变量，若不存在则返回默认值
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// 读取数值型环境变量，不存在或解析失败返回默认值
pub fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(v) => v.trim().parse::<T>().ok().unwrap_or(default),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_default() {
        assert!(env_is_true("GAIA_TEST_SURELY_MISSING_BOOL", true));
        assert_eq!(env_or_default("GAIA_TEST_SURELY_MISSING_STR", "x"), "x");
        assert_eq!(env_parse::<u16>("GAIA_TEST_SURELY_MISSING_NUM", 8000), 8000);
    }

    #[test]
    fn present_string_key_wins_over_default() {
        env::set_var("GAIA_TEST_PRESENT_STR", "mars_colony");
        assert_eq!(env_or_default("GAIA_TEST_PRESENT_STR", "ai_panic"), "mars_colony");
    }

    #[test]
    fn unparsable_number_falls_back() {
        env::set_var("GAIA_TEST_BAD_PORT", "not-a-port");
        assert_eq!(env_parse::<u16>("GAIA_TEST_BAD_PORT", 8000), 8000);
        env::set_var("GAIA_TEST_GOOD_PORT", " 9001 ");
        assert_eq!(env_parse::<u16>("GAIA_TEST_GOOD_PORT", 8000), 9001);
    }
}
