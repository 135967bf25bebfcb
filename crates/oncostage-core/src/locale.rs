//! # Locale Text
//!
//! Display text for catalog options, stage labels, recommendation buckets
//! and guideline references, in English and Arabic.
//!
//! The engine only ever returns identifiers. Presentation resolves them
//! here. A lookup in a locale that lacks an entry falls back to English.
//!
//! Free text produced by the engine (staging explanations, factors and
//! recommendation reasons) is English in every locale.

use crate::catalog::{Category, GuidelineSource, OptionId};
use crate::recommend::Bucket;
use crate::staging::Stage;
use crate::types::OncoError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// LOCALE
// =============================================================================

/// Display language.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl Locale {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = OncoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "ar" | "arabic" => Ok(Locale::Ar),
            _ => Err(OncoError::InvalidValue {
                field: "locale",
                value: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// OPTION TEXT
// =============================================================================

/// Localized text for one treatment option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionText {
    pub name: &'static str,
    pub description: &'static str,
    pub indications: &'static [&'static str],
    pub contraindications: &'static [&'static str],
    pub warnings: &'static [&'static str],
    pub notes: &'static [&'static str],
}

/// Locale-keyed option text.
#[derive(Debug, Clone, Default)]
pub struct TextCatalog {
    options: BTreeMap<(OptionId, Locale), OptionText>,
}

impl TextCatalog {
    /// Text for every option of the standard catalog in both locales.
    #[must_use]
    pub fn standard() -> Self {
        let mut text = Self::default();
        for (id, en, ar) in STANDARD_TEXT {
            text.insert(id, Locale::En, en);
            text.insert(id, Locale::Ar, ar);
        }
        text
    }

    /// Insert or replace the text of `id` in `locale`.
    pub fn insert(&mut self, id: OptionId, locale: Locale, text: OptionText) {
        self.options.insert((id, locale), text);
    }

    /// Text of `id` in `locale`, falling back to English.
    #[must_use]
    pub fn option(&self, id: OptionId, locale: Locale) -> Option<&OptionText> {
        self.options
            .get(&(id, locale))
            .or_else(|| self.options.get(&(id, Locale::En)))
    }
}

// =============================================================================
// LABELS
// =============================================================================

/// Localized stage label, e.g. "Stage III".
#[must_use]
pub const fn stage_label(stage: Stage, locale: Locale) -> &'static str {
    match (stage, locale) {
        (Stage::I, Locale::En) => "Stage I",
        (Stage::II, Locale::En) => "Stage II",
        (Stage::III, Locale::En) => "Stage III",
        (Stage::IV, Locale::En) => "Stage IV",
        (Stage::Unknown, Locale::En) => "Unknown",
        (Stage::I, Locale::Ar) => "المرحلة الأولى",
        (Stage::II, Locale::Ar) => "المرحلة الثانية",
        (Stage::III, Locale::Ar) => "المرحلة الثالثة",
        (Stage::IV, Locale::Ar) => "المرحلة الرابعة",
        (Stage::Unknown, Locale::Ar) => "غير محدد",
    }
}

/// Localized heading of a recommendation bucket.
#[must_use]
pub const fn bucket_label(bucket: Bucket, locale: Locale) -> &'static str {
    match (bucket, locale) {
        (Bucket::Neoadjuvant, Locale::En) => "Neoadjuvant Therapy",
        (Bucket::Primary, Locale::En) => "Primary Treatment",
        (Bucket::Adjuvant, Locale::En) => "Adjuvant Therapy",
        (Bucket::Alternative, Locale::En) => "Alternative Options",
        (Bucket::Neoadjuvant, Locale::Ar) => "علاج قبل الجراحة",
        (Bucket::Primary, Locale::Ar) => "العلاج الأساسي",
        (Bucket::Adjuvant, Locale::Ar) => "علاج بعد الجراحة",
        (Bucket::Alternative, Locale::Ar) => "خيارات بديلة",
    }
}

/// Localized treatment category.
#[must_use]
pub const fn category_label(category: Category, locale: Locale) -> &'static str {
    match (category, locale) {
        (Category::Surgery, Locale::En) => "Surgery",
        (Category::TargetedTherapy, Locale::En) => "Targeted Therapy",
        (Category::Immunotherapy, Locale::En) => "Immunotherapy",
        (Category::Surveillance, Locale::En) => "Active Surveillance",
        (Category::Combination, Locale::En) => "Combination Therapy",
        (Category::Radiotherapy, Locale::En) => "Radiotherapy",
        (Category::Surgery, Locale::Ar) => "الجراحة",
        (Category::TargetedTherapy, Locale::Ar) => "العلاج الموجه",
        (Category::Immunotherapy, Locale::Ar) => "العلاج المناعي",
        (Category::Surveillance, Locale::Ar) => "المراقبة النشطة",
        (Category::Combination, Locale::Ar) => "العلاج المركب",
        (Category::Radiotherapy, Locale::Ar) => "العلاج الإشعاعي",
    }
}

/// Localized title of a guideline reference.
#[must_use]
pub const fn reference_title(source: GuidelineSource, locale: Locale) -> &'static str {
    match (source, locale) {
        (GuidelineSource::Nccn, Locale::En) => "NCCN Guidelines - Kidney Cancer",
        (GuidelineSource::Esmo, Locale::En) => "ESMO Guidelines - Renal Cell Carcinoma",
        (GuidelineSource::Ajcc, Locale::En) => "AJCC Cancer Staging Manual - 8th Edition",
        (GuidelineSource::Eau, Locale::En) => "EAU Guidelines - Renal Cell Carcinoma",
        (GuidelineSource::Who, Locale::En) => "WHO / SIOP-RTSG - Pediatric Renal Tumors",
        (GuidelineSource::Nccn, Locale::Ar) => "إرشادات NCCN - سرطان الكلى",
        (GuidelineSource::Esmo, Locale::Ar) => "إرشادات ESMO - سرطان الخلايا الكلوية",
        (GuidelineSource::Ajcc, Locale::Ar) => "دليل تصنيف السرطان AJCC - الإصدار الثامن",
        (GuidelineSource::Eau, Locale::Ar) => "إرشادات EAU - سرطان الخلايا الكلوية",
        (GuidelineSource::Who, Locale::Ar) => "منظمة الصحة العالمية / SIOP-RTSG - أورام الكلى عند الأطفال",
    }
}

// =============================================================================
// STANDARD TEXT
// =============================================================================

const NONE: &[&str] = &[];

static STANDARD_TEXT: [(OptionId, OptionText, OptionText); 10] = [
    (
        OptionId::PartialNephrectomy,
        OptionText {
            name: "Partial Nephrectomy",
            description: "Surgical removal of the tumor while preserving the remaining healthy kidney tissue",
            indications: &[
                "T1a tumors (≤4 cm)",
                "T1b tumors (4-7 cm) when technically feasible",
                "Solitary kidney",
                "Bilateral tumors",
                "Pre-existing renal insufficiency",
            ],
            contraindications: &[
                "Tumor in unfavorable location (central, hilar)",
                "Multiple tumors in same kidney",
                "Patient unable to tolerate surgery",
            ],
            warnings: &[
                "Risk of positive surgical margins",
                "Potential for local recurrence",
                "Technical expertise required",
            ],
            notes: &[
                "Preferred approach for T1 tumors when technically feasible",
                "Equivalent oncological outcomes to radical nephrectomy",
                "Better preservation of renal function",
            ],
        },
        OptionText {
            name: "استئصال جزئي للكلية",
            description: "استئصال جراحي للورم مع الحفاظ على أنسجة الكلى السليمة المتبقية",
            indications: &[
                "أورام T1a (≤4 سم)",
                "أورام T1b (4-7 سم) عند إمكانية التنفيذ تقنياً",
                "كلية وحيدة",
                "أورام ثنائية الجانب",
                "قصور كلوي موجود مسبقاً",
            ],
            contraindications: &[
                "ورم في موقع غير مناسب (مركزي، سري)",
                "أورام متعددة في نفس الكلية",
                "مريض غير قادر على تحمل الجراحة",
            ],
            warnings: &[
                "خطر وجود هوامش جراحية إيجابية",
                "احتمال التكرار الموضعي",
                "تتطلب خبرة تقنية",
            ],
            notes: &[
                "النهج المفضل لأورام T1 عند إمكانية التنفيذ تقنياً",
                "نتائج أورام مكافئة لاستئصال الكلية الجذري",
                "حفظ أفضل لوظائف الكلى",
            ],
        },
    ),
    (
        OptionId::RadicalNephrectomy,
        OptionText {
            name: "Radical Nephrectomy",
            description: "Complete surgical removal of the kidney, surrounding fat, and Gerota fascia",
            indications: &[
                "T2 tumors (>7 cm)",
                "T3 tumors with vascular extension",
                "T1 tumors not amenable to partial nephrectomy",
                "Locally advanced disease",
            ],
            contraindications: &[
                "Solitary kidney (relative)",
                "Severe renal insufficiency (relative)",
                "Patient unfit for major surgery",
            ],
            warnings: &[
                "Permanent loss of renal unit",
                "Risk of chronic kidney disease",
                "Adrenalectomy may not always be necessary",
            ],
            notes: &[
                "Consider adrenal-sparing approach if not involved",
                "Lymph node dissection for staging purposes",
                "Thrombectomy required for vena cava involvement",
            ],
        },
        OptionText {
            name: "استئصال الكلية الجذري",
            description: "استئصال جراحي كامل للكلية والدهون المحيطة ولفافة جيروتا",
            indications: &[
                "أورام T2 (>7 سم)",
                "أورام T3 مع امتداد وعائي",
                "أورام T1 غير قابلة لاستئصال جزئي",
                "مرض متقدم موضعياً",
            ],
            contraindications: &[
                "كلية وحيدة (نسبي)",
                "قصور كلوي شديد (نسبي)",
                "مريض غير مناسب لجراحة كبرى",
            ],
            warnings: &[
                "فقدان دائم للوحدة الكلوية",
                "خطر مرض الكلى المزمن",
                "استئصال الغدة الكظرية قد لا يكون ضرورياً دائماً",
            ],
            notes: &[
                "النظر في نهج الحفاظ على الغدة الكظرية إذا لم تكن مصابة",
                "تشريح العقد اللمفاوية لأغراض التصنيف",
                "استئصال الخثرة مطلوب لإصابة الوريد الأجوف",
            ],
        },
    ),
    (
        OptionId::ActiveSurveillance,
        OptionText {
            name: "Active Surveillance",
            description: "Close monitoring with imaging and clinical assessment without immediate intervention",
            indications: &[
                "Small renal masses (≤4 cm)",
                "Elderly patients with limited life expectancy",
                "Significant comorbidities increasing surgical risk",
                "Patient preference",
            ],
            contraindications: &[
                "Young patients with long life expectancy",
                "Tumors showing rapid growth",
                "Patient anxiety affecting quality of life",
            ],
            warnings: &[
                "Risk of disease progression",
                "Requires reliable follow-up",
                "1-2% risk of metastatic progression",
            ],
            notes: &[
                "Follow-up imaging every 3-6 months initially",
                "Consider intervention if growth rate >0.5 cm/year",
                "Can transition to active treatment if needed",
            ],
        },
        OptionText {
            name: "المراقبة النشطة",
            description: "مراقبة دقيقة بالتصوير والتقييم السريري دون تدخل فوري",
            indications: &[
                "كتل كلوية صغيرة (≤4 سم)",
                "مرضى كبار السن مع متوسط عمر متوقع محدود",
                "أمراض مصاحبة كبيرة تزيد من مخاطر الجراحة",
                "تفضيل المريض",
            ],
            contraindications: &[
                "مرضى شباب مع متوسط عمر متوقع طويل",
                "أورام تظهر نمواً سريعاً",
                "قلق المريض يؤثر على جودة الحياة",
            ],
            warnings: &[
                "خطر تقدم المرض",
                "يتطلب متابعة موثوقة",
                "خطر 1-2% للتقدم النقيلي",
            ],
            notes: &[
                "تصوير متابعة كل 3-6 أشهر مبدئياً",
                "النظر في التدخل إذا كان معدل النمو >0.5 سم/سنة",
                "يمكن الانتقال للعلاج النشط إذا لزم الأمر",
            ],
        },
    ),
    (
        OptionId::PembrolizumabAdjuvant,
        OptionText {
            name: "Pembrolizumab (Adjuvant)",
            description: "PD-1 inhibitor immunotherapy given after surgery to reduce recurrence risk",
            indications: &[
                "Clear cell RCC after nephrectomy",
                "Intermediate-high or high risk of recurrence",
                "pT2 Grade 4 or sarcomatoid",
                "pT3 or higher",
                "pN+ (node positive)",
                "M1 NED after metastasectomy",
            ],
            contraindications: &[
                "Active autoimmune disease",
                "History of severe immune-related adverse events",
                "Organ transplant recipients",
                "Non-clear cell histology",
            ],
            warnings: &[
                "Immune-related adverse events (pneumonitis, colitis, hepatitis)",
                "Thyroid dysfunction common",
                "May require corticosteroid management",
                "Regular monitoring required",
            ],
            notes: &[
                "Duration: Up to 1 year (17 cycles)",
                "Dose: 200 mg IV every 3 weeks or 400 mg every 6 weeks",
                "Based on KEYNOTE-564 trial",
                "Significant improvement in disease-free survival",
            ],
        },
        OptionText {
            name: "بيمبروليزوماب (مساعد)",
            description: "علاج مناعي مثبط PD-1 يُعطى بعد الجراحة لتقليل خطر التكرار",
            indications: &[
                "سرطان خلايا صافية بعد استئصال الكلية",
                "خطر متوسط-عالي أو عالي للتكرار",
                "pT2 درجة 4 أو ساركوماتويد",
                "pT3 أو أعلى",
                "pN+ (إيجابي العقد)",
                "M1 NED بعد استئصال النقائل",
            ],
            contraindications: &[
                "مرض مناعي ذاتي نشط",
                "تاريخ أحداث ضارة مناعية شديدة",
                "متلقو زراعة الأعضاء",
                "نسيج غير خلايا صافية",
            ],
            warnings: &[
                "أحداث ضارة مناعية (التهاب رئوي، التهاب قولون، التهاب كبد)",
                "خلل الغدة الدرقية شائع",
                "قد يتطلب إدارة بالكورتيكوستيرويد",
                "مراقبة منتظمة مطلوبة",
            ],
            notes: &[
                "المدة: حتى سنة واحدة (17 دورة)",
                "الجرعة: 200 ملغ وريدياً كل 3 أسابيع أو 400 ملغ كل 6 أسابيع",
                "بناءً على تجربة KEYNOTE-564",
                "تحسن كبير في البقاء دون مرض",
            ],
        },
    ),
    (
        OptionId::SystemicTherapyAdvanced,
        OptionText {
            name: "First-Line Systemic Therapy",
            description: "Combination immunotherapy or targeted therapy for metastatic disease",
            indications: &[
                "Stage IV metastatic RCC",
                "Unresectable locally advanced disease",
                "Clear cell histology (preferred regimens)",
            ],
            contraindications: &[
                "Poor performance status (ECOG ≥3)",
                "Active severe infections",
                "Uncontrolled hypertension (for TKIs)",
            ],
            warnings: &[
                "Immune-related adverse events with immunotherapy",
                "Hypertension and cardiac events with TKIs",
                "Regular monitoring of liver and thyroid function",
            ],
            notes: &[
                "Preferred: Ipilimumab + Nivolumab, Pembrolizumab + Axitinib/Lenvatinib",
                "Alternative: Cabozantinib, Sunitinib (monotherapy)",
                "Consider IMDC risk stratification",
                "Cytoreductive nephrectomy may be considered in selected patients",
            ],
        },
        OptionText {
            name: "العلاج الجهازي الخط الأول",
            description: "علاج مناعي مركب أو علاج موجه للمرض النقيلي",
            indications: &[
                "المرحلة الرابعة سرطان الكلى النقيلي",
                "مرض متقدم موضعياً غير قابل للاستئصال",
                "نسيج خلايا صافية (الأنظمة المفضلة)",
            ],
            contraindications: &[
                "حالة أداء ضعيفة (ECOG ≥3)",
                "عدوى نشطة شديدة",
                "ارتفاع ضغط دم غير مسيطر عليه (لمثبطات TKI)",
            ],
            warnings: &[
                "أحداث ضارة مناعية مع العلاج المناعي",
                "ارتفاع ضغط الدم وأحداث قلبية مع TKI",
                "مراقبة منتظمة لوظائف الكبد والغدة الدرقية",
            ],
            notes: &[
                "المفضل: إيبيليموماب + نيفولوماب، بيمبروليزوماب + أكسيتينيب/لينفاتينيب",
                "بديل: كابوزانتينيب، سونيتينيب (علاج أحادي)",
                "النظر في تقسيم مخاطر IMDC",
                "استئصال الكلية السيتوريدوكتيف قد يُنظر فيه في مرضى مختارين",
            ],
        },
    ),
    (
        OptionId::PreOpVa,
        OptionText {
            name: "Pre-op VA (Vincristine + Actinomycin D)",
            description: "Standard 4-week pre-operative chemotherapy for localized tumors",
            indications: &["Localized pediatric renal tumors", "Patient age > 6 months"],
            contraindications: &[
                "Patient < 6 months old",
                "Suspected clear cell sarcoma or rhabdoid tumor",
            ],
            warnings: &["Vincristine neurotoxicity", "Actinomycin D liver toxicity"],
            notes: &[
                "Standard for SIOP protocols",
                "Goal is tumor shrinkage to reduce rupture risk",
            ],
        },
        OptionText {
            name: "علاج VA قبل العملية (فينكريستين + أكتينومايسين د)",
            description: "علاج كيماوي قياسي لمدة 4 أسابيع قبل العملية للأورام الموضعية",
            indications: &["أورام الكلى الموضعية عند الأطفال", "عمر المريض > 6 أشهر"],
            contraindications: &[
                "مريض عمره أقل من 6 أشهر",
                "اشتباه في ساركوما الخلايا الصافية أو ورم رابدويد",
            ],
            warnings: &["سمية عصبية من الفينكريستين", "سمية كبدية من الأكتينومايسين د"],
            notes: &["معيار بروتوكولات SIOP", "الهدف هو تصغير الورم لتقليل خطر الانفجار"],
        },
    ),
    (
        OptionId::ObservationOrShortVa,
        OptionText {
            name: "Observation or 4w VA",
            description: "Short courses of Vincristine and Actinomycin D",
            indications: &["Stage I Low Risk"],
            contraindications: NONE,
            warnings: NONE,
            notes: &["Reduced intensity for favorable stages"],
        },
        OptionText {
            name: "الملاحظة أو 4 أسابيع VA",
            description: "دورات قصيرة من فينكريستين وأكتينومايسين د",
            indications: &["المرحلة الأولى خطر منخفض"],
            contraindications: NONE,
            warnings: NONE,
            notes: &["كثافة منخفضة للمراحل المفضلة"],
        },
    ),
    (
        OptionId::PostOpVa9w,
        OptionText {
            name: "Post-op VA (9 Weeks)",
            description: "Short courses of Vincristine and Actinomycin D",
            indications: &["Stage I Intermediate Risk", "Stage I Low Risk (some cases)"],
            contraindications: NONE,
            warnings: NONE,
            notes: &["Reduced intensity for favorable stages"],
        },
        OptionText {
            name: "علاج VA بعد العملية (9 أسابيع)",
            description: "دورات قصيرة من فينكريستين وأكتينومايسين د",
            indications: &["المرحلة الأولى خطر متوسط", "المرحلة الأولى خطر منخفض (في بعض الحالات)"],
            contraindications: NONE,
            warnings: NONE,
            notes: &["كثافة منخفضة للمراحل المفضلة"],
        },
    ),
    (
        OptionId::PostOpVad28w,
        OptionText {
            name: "Post-op VAD (28 Weeks)",
            description: "Vincristine + Actinomycin D + Doxorubicin intensified regimen",
            indications: &["Stage III Intermediate Risk", "Stage II/III High Risk"],
            contraindications: NONE,
            warnings: &["Cardiotoxicity from Doxorubicin"],
            notes: &["Requires cardiac monitoring (Echo)"],
        },
        OptionText {
            name: "علاج VAD بعد العملية (28 أسبوع)",
            description: "نظام مكثف من فينكريستين + أكتينومايسين د + دوكسوروبيسين",
            indications: &["المرحلة الثالثة خطر متوسط", "المرحلة الثانية/الثالثة خطر عالٍ"],
            contraindications: NONE,
            warnings: &["سمية لقلب من دوكسوروبيسين"],
            notes: &["يتطلب مراقبة للقلب (إيكو)"],
        },
    ),
    (
        OptionId::RadiotherapyAbdominal,
        OptionText {
            name: "Abdominal Radiotherapy",
            description: "Local radiation to the tumor bed",
            indications: &[
                "Stage III Intermediate Risk",
                "Any Stage High Risk (except Stage I LR)",
            ],
            contraindications: NONE,
            warnings: &["Late effects on growth and secondary malignancies"],
            notes: &["Flank radiation or whole abdomen if diffuse contamination"],
        },
        OptionText {
            name: "العلاج الإشعاعي للبطن",
            description: "إشعاع موضعي لمكان الورم",
            indications: &[
                "المرحلة الثالثة خطر متوسط",
                "أي مرحلة خطر عالٍ (عدا المرحلة الأولى منخفضة الخطر)",
            ],
            contraindications: NONE,
            warnings: &["تأثيرات متأخرة على النمو وأورام ثانوية"],
            notes: &["إشعاع للجنب أو كامل البطن في حال التلوث المنتشر"],
        },
    ),
];

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_option_has_text_in_both_locales() {
        let text = TextCatalog::standard();
        for id in OptionId::ALL {
            let en = text.option(id, Locale::En).expect("english");
            let ar = text.option(id, Locale::Ar).expect("arabic");
            assert!(!en.name.is_empty());
            assert_ne!(en.name, ar.name, "{id} has untranslated name");
        }
    }

    #[test]
    fn missing_locale_falls_back_to_english() {
        let standard = TextCatalog::standard();
        let english = *standard
            .option(OptionId::PreOpVa, Locale::En)
            .expect("english");

        let mut text = TextCatalog::default();
        text.insert(OptionId::PreOpVa, Locale::En, english);
        let resolved = text.option(OptionId::PreOpVa, Locale::Ar).expect("fallback");
        assert_eq!(resolved.name, "Pre-op VA (Vincristine + Actinomycin D)");
        assert!(text.option(OptionId::PostOpVa9w, Locale::Ar).is_none());
    }

    #[test]
    fn locale_parsing() {
        assert_eq!("EN".parse::<Locale>().ok(), Some(Locale::En));
        assert_eq!("ar".parse::<Locale>().ok(), Some(Locale::Ar));
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn stage_labels() {
        assert_eq!(stage_label(Stage::III, Locale::En), "Stage III");
        assert_eq!(stage_label(Stage::I, Locale::Ar), "المرحلة الأولى");
        assert_eq!(stage_label(Stage::Unknown, Locale::En), "Unknown");
    }

    #[test]
    fn observation_shares_short_va_notes() {
        let text = TextCatalog::standard();
        let observation = text.option(OptionId::ObservationOrShortVa, Locale::En).expect("en");
        let short_va = text.option(OptionId::PostOpVa9w, Locale::En).expect("en");
        assert_eq!(observation.name, "Observation or 4w VA");
        assert_eq!(observation.notes, short_va.notes);
    }
}
