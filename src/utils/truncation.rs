const MAX_OUTPUT_LENGTH: usize = 15_000;
const MAX_ERROR_LENGTH: usize = 2_000;

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Keep the head and tail of long scanner output.
pub fn truncate_output(output: &str) -> String {
    if output.len() <= MAX_OUTPUT_LENGTH {
        return output.to_string();
    }
    let half = MAX_OUTPUT_LENGTH / 2;
    let head_end = floor_char_boundary(output, half);
    let mut tail_start = output.len() - half;
    while !output.is_char_boundary(tail_start) {
        tail_start += 1;
    }
    format!(
        "{}\n\n... [truncated {} chars] ...\n\n{}",
        &output[..head_end],
        tail_start - head_end,
        &output[tail_start..]
    )
}

pub fn truncate_error(error: &str) -> String {
    if error.len() <= MAX_ERROR_LENGTH {
        error.to_string()
    } else {
        format!("{}...", &error[..floor_char_boundary(error, MAX_ERROR_LENGTH)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_output_untouched() {
        assert_eq!(truncate_output("ok"), "ok");
    }

    #[test]
    fn test_long_output_keeps_head_and_tail() {
        let output = format!("{}{}", "a".repeat(10_000), "b".repeat(10_000));
        let truncated = truncate_output(&output);
        assert!(truncated.starts_with("aaa"));
        assert!(truncated.ends_with("bbb"));
        assert!(truncated.contains("[truncated 5000 chars]"));
    }

    #[test]
    fn test_truncate_error_multibyte_safe() {
        let error = "é".repeat(1_500);
        let truncated = truncate_error(&error);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= MAX_ERROR_LENGTH + 3);
    }
}
