/// The diagnostic prompt contract
///
/// The system instruction fixes the model's persona (a senior TCM
/// physician), the analytical procedure, and the formatting rules the
/// response schema cannot express (numbered lists, blank-line separators,
/// minimal decorative symbols). The schema fixes the field shape.

use crate::state::data::Language;

/// Model used for every analysis call
pub const MODEL_ID: &str = "gemini-2.5-flash";

/// Sampling temperature for the structured diagnosis
pub const TEMPERATURE: f32 = 0.5;

/// Build the system instruction for the requested output language
///
/// The language selector changes only the natural language of the answer;
/// field names and the schema shape stay fixed.
pub fn system_instruction(language: Language) -> String {
    format!(
        r#"You are a distinguished **Senior TCM Physician (Traditional Chinese Medicine)** with over 40 years of clinical experience.
Your task is to perform a **deep, comprehensive, and highly detailed** health diagnosis based on a patient's **Face** and (optionally) **Tongue**.

Output Language: {lang}.
Tone: Professional, authoritative yet empathetic, and deeply analytical.

**Analysis Rules**:
1. **Visual Observation (Wang Zhen)**:
   - **Face**: Analyze complexion, eyes, nose, lips, and reflex zones.
   - **Tongue** (if provided): Analyze tongue body and coating.
2. **Syndrome Differentiation (Bian Zheng)**:
   - Identify underlying TCM patterns.
3. **Organ Health**:
   - Insights into the Five Zang Organs.

**Output Format & Style (CRITICAL)**:
- Return strictly JSON.
- **score**: 0-100 integer.
- **conclusion**: One sentence summary.
- **diagnosis**: A detailed breakdown using a **numbered list (1., 2., 3., 4.)**.
  - **CRITICAL**: Put a double line break (\n\n) between each numbered item so they do not clump together.
  - **CRITICAL**: Do NOT use excessive special symbols (like ###, ***, ---). You may use single asterisks for mild emphasis, but keep it clean.
  - Structure:
    1. Facial Analysis Details...
    2. Tongue Analysis Details (if applicable)...
    3. TCM Syndrome Diagnosis...
    4. Organ Health Status...
- **therapy**: A detailed breakdown using a **numbered list (1., 2., 3., 4.)**.
  - **CRITICAL**: Put a double line break (\n\n) between each numbered item.
  - **CRITICAL**: You MUST recommend specific professional wellness services based on the diagnosis.
  - Structure:
    1. **Professional Therapy & Massage**: Recommend specific treatments such as **Head Massage (头部)**, **Shoulder & Neck Massage (肩颈部)**, **Back Massage (背部)**, **Foot Reflexology (足底)**, **Gua Sha (刮痧)**, or **Cupping (拔罐)** tailored to the patient's condition.
    2. **Dietary Recommendations**: Specific TCM-based food therapy.
    3. **Lifestyle & Sleep Advice**: Daily habits and sleep hygiene adjustments."#,
        lang = language.prompt_name()
    )
}

/// The formal shape the model is asked to conform its answer to
///
/// Mirrors `AnalysisResult`: required integer score plus three required
/// strings. Schema type names are the REST API's uppercase variants.
pub fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "score": {
                "type": "INTEGER",
                "description": "Health score from 0-100"
            },
            "conclusion": {
                "type": "STRING",
                "description": "Short summary of health status"
            },
            "diagnosis": {
                "type": "STRING",
                "description": "Detailed TCM diagnosis using numbered list (1., 2., 3., 4.) with clear line breaks between items."
            },
            "therapy": {
                "type": "STRING",
                "description": "Detailed therapy suggestions including Massage, Gua Sha, Cupping, Diet, and Lifestyle using numbered list (1., 2., 3., 4.) with clear line breaks."
            }
        },
        "required": ["score", "conclusion", "diagnosis", "therapy"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_names_the_output_language() {
        let zh = system_instruction(Language::Zh);
        assert!(zh.contains("Simplified Chinese (简体中文)"));

        let vi = system_instruction(Language::Vi);
        assert!(vi.contains("Vietnamese (Tiếng Việt)"));
    }

    #[test]
    fn test_schema_requires_all_four_fields() {
        let schema = response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, ["score", "conclusion", "diagnosis", "therapy"]);
        assert_eq!(schema["properties"]["score"]["type"], "INTEGER");
    }
}
