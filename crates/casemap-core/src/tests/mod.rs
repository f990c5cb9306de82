
use crate::SurveyRow;
use serde_json::json;

/// A small survey sheet in the shape the catalog API exports.
pub(crate) fn sample_rows() -> Vec<SurveyRow> {
    serde_json::from_value(json!([
        {
            "事例": "R-01", "発言者": "A", "発言内容": "道を広げた",
            "整備": "拡幅", "目的": "安全", "発意": "自治会", "所有": "公道",
            "時期": "昭和40年代", "緯度": null, "経度": null
        },
        {
            "事例": "R-01", "発言者": "B", "発言内容": "不明",
            "整備": "舗装", "目的": "安全", "発意": "自治会", "所有": "公道",
            "時期": "平成初期", "緯度": "34.2431", "経度": "132.5512", "写真": "r01.jpg"
        },
        {
            "事例": "C-02", "発言者": "C", "発言内容": "花壇を作った",
            "整備": "花壇", "目的": "景観", "発意": "個人", "所有": "私有地",
            "時期": "最近", "緯度": 34.2431, "経度": 132.5512
        },
        {
            "事例": "R-03", "発言者": "D", "発言内容": "側溝に蓋をした",
            "整備": "側溝", "目的": "安全", "発意": "自治会", "所有": "公道",
            "時期": "戦前"
        },
        {
            "事例": "K-04", "発言者": "E", "発言内容": "",
            "整備": "拡幅", "発意": "個人",
            "緯度": "abc", "経度": 132.5
        },
        {
            "発言者": "F", "発言内容": "事例番号なし"
        }
    ]))
    .unwrap()
}
