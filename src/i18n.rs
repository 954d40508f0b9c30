/// Bilingual UI strings
///
/// Every user-facing label in Simplified Chinese and Vietnamese. The
/// language selector swaps this whole bundle at once.

use crate::state::data::Language;

/// One bundle of localized labels
#[derive(Debug, Clone, Copy)]
pub struct UiText {
    pub app_title: &'static str,
    pub app_subtitle: &'static str,

    pub face_label: &'static str,
    pub tongue_label: &'static str,
    pub mandatory: &'static str,
    pub optional: &'static str,

    pub start_camera: &'static str,
    pub upload_photo: &'static str,
    pub error_camera: &'static str,

    pub start: &'static str,
    pub need_face_hint: &'static str,

    pub analyzing_title: &'static str,
    pub analyzing_desc: &'static str,
    pub error_title: &'static str,
    pub diagnosis_title: &'static str,
    pub therapy_title: &'static str,
    pub score: &'static str,
    pub waiting: &'static str,
}

impl UiText {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::Zh => UiText {
                app_title: "AI FaceHealth Scan",
                app_subtitle: "Powered by Gemini",
                face_label: "面部扫描",
                tongue_label: "舌苔扫描",
                mandatory: "(必须)",
                optional: "(可选)",
                start_camera: "拍照",
                upload_photo: "上传",
                error_camera: "无法访问摄像头",
                start: "开始诊断",
                need_face_hint: "请先上传面部照片",
                analyzing_title: "AI 正在深入分析...",
                analyzing_desc: "结合面诊与舌诊数据...",
                error_title: "分析失败",
                diagnosis_title: "身体健康诊断",
                therapy_title: "理疗建议方案",
                score: "健康评分",
                waiting: "等待数据...",
            },
            Language::Vi => UiText {
                app_title: "AI FaceHealth Scan",
                app_subtitle: "Powered by Gemini",
                face_label: "Quét Khuôn Mặt",
                tongue_label: "Quét Lưỡi",
                mandatory: "(Bắt buộc)",
                optional: "(Tùy chọn)",
                start_camera: "Chụp ảnh",
                upload_photo: "Tải lên",
                error_camera: "Lỗi camera",
                start: "Bắt đầu chẩn đoán",
                need_face_hint: "Vui lòng tải ảnh mặt trước",
                analyzing_title: "AI đang phân tích...",
                analyzing_desc: "Kết hợp dữ liệu khuôn mặt và lưỡi...",
                error_title: "Lỗi phân tích",
                diagnosis_title: "Chẩn đoán sức khỏe",
                therapy_title: "Phác đồ điều trị",
                score: "Điểm sức khỏe",
                waiting: "Đang chờ dữ liệu...",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_bundles_are_fully_populated() {
        for language in [Language::Zh, Language::Vi] {
            let t = UiText::for_language(language);
            for label in [
                t.face_label,
                t.tongue_label,
                t.start_camera,
                t.upload_photo,
                t.error_camera,
                t.start,
                t.need_face_hint,
                t.analyzing_title,
                t.error_title,
                t.diagnosis_title,
                t.therapy_title,
                t.score,
                t.waiting,
            ] {
                assert!(!label.is_empty());
            }
        }
    }

    #[test]
    fn test_languages_differ() {
        let zh = UiText::for_language(Language::Zh);
        let vi = UiText::for_language(Language::Vi);
        assert_ne!(zh.start, vi.start);
        assert_ne!(zh.face_label, vi.face_label);
    }
}
