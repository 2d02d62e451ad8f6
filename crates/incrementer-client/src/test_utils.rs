pub fn mkerr(error_code: &str, message: &str) -> serde_json::Value {
    serde_json::json!({ "errorCode": error_code, "message": message })
}

pub fn client(base_url: String) -> crate::Client {
    crate::Client {
        base_url,
        reqwest: reqwest::Client::new(),
        deadline: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evals_properly() {
        assert_eq!(
            mkerr("MY_ERR_CODE", "my message").to_string(),
            serde_json::json!({ "errorCode": "MY_ERR_CODE", "message": "my message" }).to_string()
        );
    }
}
