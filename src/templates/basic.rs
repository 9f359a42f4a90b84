//! Basic research schema: question, method, results, conclusion, mechanism.

use super::{ModuleDef, ModuleSchema, Position};
use crate::models::PaperType;

const MODULES: &[ModuleDef] = &[
    ModuleDef {
        key: "scientific_question",
        label: "Scientific Question",
        aliases: &[
            "background",
            "introduction",
            "scientific question",
            "research question",
            "科学问题",
            "背景",
            "引言",
        ],
        triggers: &[
            "remains unclear",
            "remains unknown",
            "is poorly understood",
            "we sought to",
            "we aimed to",
            "however",
            "然而",
        ],
        position: Some(Position::Leading),
        max_chars: 400,
    },
    ModuleDef {
        key: "research_method",
        label: "Research Method",
        aliases: &[
            "methods",
            "methodology",
            "materials and methods",
            "experimental procedures",
            "方法",
            "研究方法",
            "实验方法",
        ],
        triggers: &[
            "we performed",
            "we used",
            "were cultured",
            "cell culture",
            "western blot",
            "qpcr",
            "knockdown",
            "were treated with",
        ],
        position: None,
        max_chars: 500,
    },
    ModuleDef {
        key: "results",
        label: "Results",
        aliases: &["results", "findings", "结果"],
        triggers: &[
            "we found",
            "showed",
            "increased",
            "decreased",
            "significantly",
            "enhanced",
            "reduced",
            "p<",
            "p <",
        ],
        position: None,
        max_chars: 600,
    },
    ModuleDef {
        key: "conclusion",
        label: "Conclusion",
        aliases: &["conclusion", "conclusions", "discussion", "结论", "讨论"],
        triggers: &[
            "in conclusion",
            "these findings",
            "demonstrate that",
            "indicate that",
            "suggest that",
            "therefore",
            "综上",
        ],
        position: Some(Position::Trailing),
        max_chars: 500,
    },
    ModuleDef {
        key: "mechanism",
        label: "Mechanism",
        aliases: &["mechanism", "mechanisms", "mechanism of action", "作用机制", "分子机制"],
        triggers: &[
            "mechanism",
            "pathway",
            "signaling",
            "signalling",
            "mediates",
            "regulates",
            "activates",
            "inhibits",
            "upregulation",
            "downregulation",
            "信号通路",
        ],
        position: None,
        max_chars: 500,
    },
];

pub(super) fn schema() -> ModuleSchema {
    ModuleSchema::new(PaperType::BasicResearch, MODULES.to_vec())
}
