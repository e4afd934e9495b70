//! Local fallback conversion
//!
//! Used for the whole process lifetime when no completion client could be
//! configured at startup. Pure string substitution: the same input always
//! produces the same output.

use biztone_common::{api::ConversionRequest, Audience};

/// Canned phrase surrounding the input, indexed by `Audience as usize`
struct FallbackTemplate {
    prefix: &'static str,
    suffix: &'static str,
}

static TEMPLATES: [FallbackTemplate; 3] = [
    FallbackTemplate {
        prefix: "[상사 보고용] ",
        suffix: " 관련하여 보고 드립니다. 확인 부탁드립니다.",
    },
    FallbackTemplate {
        prefix: "[동료 공유용] 안녕하세요, ",
        suffix: " 관련하여 공유드립니다.",
    },
    FallbackTemplate {
        prefix: "[고객 안내용] 고객님, ",
        suffix: " 건에 대해 안내해 드리겠습니다.",
    },
];

fn template(audience: Audience) -> &'static FallbackTemplate {
    &TEMPLATES[audience as usize]
}

/// Render the fallback text for a validated request
pub fn convert(request: &ConversionRequest) -> String {
    let template = template(request.target());
    format!("{}{}{}", template.prefix, request.text(), template.suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embeds_trimmed_input_verbatim() {
        for audience in Audience::ALL {
            let request = ConversionRequest::new("  배송이 늦어짐  ", audience).unwrap();
            let converted = convert(&request);

            assert!(converted.contains("배송이 늦어짐"), "{audience}: {converted}");
            assert!(!converted.contains("  배송이"), "{audience}: {converted}");
            assert!(converted.starts_with('['));
        }
    }

    #[test]
    fn test_known_outputs() {
        let boss = ConversionRequest::new("회의 취소", Audience::Boss).unwrap();
        assert_eq!(
            convert(&boss),
            "[상사 보고용] 회의 취소 관련하여 보고 드립니다. 확인 부탁드립니다."
        );

        let customer = ConversionRequest::new("환불 지연", Audience::Customer).unwrap();
        assert_eq!(
            convert(&customer),
            "[고객 안내용] 고객님, 환불 지연 건에 대해 안내해 드리겠습니다."
        );
    }

    #[test]
    fn test_is_deterministic() {
        let request = ConversionRequest::new("내일 휴가", Audience::Colleague).unwrap();
        assert_eq!(convert(&request), convert(&request));
    }

    #[test]
    fn test_templates_are_distinct() {
        let outputs: Vec<String> = Audience::ALL
            .into_iter()
            .map(|audience| convert(&ConversionRequest::new("x", audience).unwrap()))
            .collect();

        assert_ne!(outputs[0], outputs[1]);
        assert_ne!(outputs[1], outputs[2]);
        assert_ne!(outputs[0], outputs[2]);
    }
}
