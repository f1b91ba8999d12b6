//! Industry profiles: scoring dimensions, rewrite strategy, quantification
//! placeholders and roast openers per target role.

use rand::{seq::SliceRandom, Rng};
use serde::Serialize;

pub const DEFAULT_INDUSTRY: &str = "programmer";

#[derive(Debug, Serialize)]
pub struct IndustryProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub dimensions: [&'static str; 6],
    pub expert_mode_name: &'static str,
    #[serde(skip)]
    pub expert_strategy: &'static str,
    #[serde(skip)]
    pub data_placeholders: &'static [&'static str],
    #[serde(skip)]
    pub roast_openers: &'static [&'static str],
}

impl IndustryProfile {
    /// Picks the line a roast must open with.
    pub fn roast_opener<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        self.roast_openers.choose(rng).copied().unwrap_or_default()
    }

    pub fn placeholder_list(&self) -> String {
        self.data_placeholders.join("、")
    }
}

/// Looks up a profile by id; unknown ids fall back to the programmer profile.
pub fn industry_profile(id: &str) -> &'static IndustryProfile {
    INDUSTRIES
        .iter()
        .find(|p| p.id == id)
        .unwrap_or(&INDUSTRIES[0])
}

pub static INDUSTRIES: [IndustryProfile; 11] = [
    IndustryProfile {
        id: DEFAULT_INDUSTRY,
        name: "技术/程序员",
        dimensions: ["算法基础", "系统架构", "工程质量", "技术广度", "业务理解", "影响力"],
        expert_mode_name: "架构思维与技术壁垒版",
        expert_strategy: "强调高并发处理、系统稳定性、源码级理解、技术选型决策。突出对底层原理的掌握和架构设计的经验。",
        data_placeholders: &["[QPS 提升了 X%]", "[延迟降低了 Yms]", "[Crash率降低至 Z%]", "[节省服务器成本 W%]"],
        roast_openers: &[
            "你的简历堆砌了一堆技术名词，像个报菜名的服务员，看不出任何深度。",
            "这项目经历写得像记流水账，你是个打字员吗？",
            "看完你的简历，我只记住了你会用 CRUD，这就是你的核心竞争力？",
            "技术栈罗列了一整页，但我看不到任何一个你真正精通的。",
        ],
    },
    IndustryProfile {
        id: "devops",
        name: "运维/SRE",
        dimensions: ["自动化运维", "系统稳定性", "云原生技术", "成本控制", "故障响应", "安全合规"],
        expert_mode_name: "SRE 体系与稳定性建设版",
        expert_strategy: "强调 SLA/SLO 承诺、CI/CD 流水线效率、容器化编排 (K8s)、可观测性建设、以及降本增效。",
        data_placeholders: &["[系统可用性 (SLA) 提升至 99.99%]", "[部署效率提升 X%]", "[云资源成本降低 Y%]", "[故障恢复时间 (MTTR) 缩短 Z分钟]"],
        roast_openers: &[
            "你只是个会重启服务器的网管吗？我看不到任何自动化思维。",
            "出了故障全靠人肉填坑？你的容灾方案和监控体系在哪里？",
            "写了一堆运维脚本就叫 DevOps？CI/CD 流水线呢？可观测性呢？",
            "云原生时代还在手动部署？你确定不是在维护上古系统？",
        ],
    },
    IndustryProfile {
        id: "security",
        name: "网络安全",
        dimensions: ["漏洞挖掘", "防御架构", "应急响应", "合规审计", "渗透测试", "安全开发"],
        expert_mode_name: "零信任架构与攻防对抗版",
        expert_strategy: "强调主动防御体系、SDL (安全开发生命周期)、等级保护/GDPR 合规、以及攻防演练战果。",
        data_placeholders: &["[修复高危漏洞 X个]", "[拦截恶意攻击 Y万次]", "[安全审计通过率 100%]", "[应急响应速度缩短至 Z分钟]"],
        roast_openers: &[
            "你只会用脚本跑现成的扫描器吗？我看不到深度攻防能力。",
            "等黑客进来了再报警？你的纵深防御体系和威胁情报在哪里？",
            "安全报告写得像百度百科，有实战经验吗？",
            "只会做合规检查？真正的红蓝对抗你打过几场？",
        ],
    },
    IndustryProfile {
        id: "qa",
        name: "测试工程师",
        dimensions: ["测试策略", "自动化覆盖", "缺陷分析", "性能测试", "持续集成", "用户视角"],
        expert_mode_name: "质量效能与自动化体系版",
        expert_strategy: "强调测试左移 (Shift Left)、精准测试、自动化覆盖率提升、以及对线上质量 (线上故障率) 的保障。",
        data_placeholders: &["[自动化测试覆盖率达到 X%]", "[线上故障率降低 Y%]", "[回归测试周期缩短 Z天]", "[发现核心性能瓶颈 W个]"],
        roast_openers: &[
            "你只会对着页面点点点的\"点工\"吗？自动化代码在哪里？",
            "测了半天上线还是挂，你的测试用例设计逻辑不仅简陋，而且全是漏洞。",
            "功能测试做得热闹，性能瓶颈一个没发现？",
            "测试报告写得像流水账，缺陷根因分析在哪里？",
        ],
    },
    IndustryProfile {
        id: "pm",
        name: "产品经理",
        dimensions: ["商业洞察", "用户体验", "数据分析", "项目管理", "沟通协调", "战略规划"],
        expert_mode_name: "商业闭环与产品战略版",
        expert_strategy: "强调 ROI（投资回报率）、GTM（上市策略）、Roadmap 规划、从 0 到 1 的破局能力。体现商业思维和战略视野。",
        data_placeholders: &["[DAU 提升了 X%]", "[用户留存率 +Y%]", "[转化率提升 Z%]", "[带来营收 W万]"],
        roast_openers: &[
            "我看不到任何商业思考，你只是个画原型的工具人吗？",
            "全是'参与了'、'协助了'，你的个人贡献在哪里？",
            "这简历像是在写工作日志，不是在证明你的产品能力。",
        ],
    },
    IndustryProfile {
        id: "designer",
        name: "UI/UX设计师",
        dimensions: ["视觉表现", "交互逻辑", "用户同理心", "设计规范", "品牌理解", "工具效率"],
        expert_mode_name: "设计思维与用户体验版",
        expert_strategy: "强调 Design System（设计系统）的搭建、全链路设计、品牌一致性、设计对数据的赋能。",
        data_placeholders: &["[点击率 (CTR) 提升 X%]", "[改稿效率提升 Y%]", "[用户满意度 (NPS) +Z]", "[任务完成时间缩短 W%]"],
        roast_openers: &[
            "这排版乱得像我在地铁上挤出来的。",
            "你的作品集看起来像是 5 年前的 Dribbble 练习稿，毫无落地性。",
            "我看不到任何用户思维，你确定你不是美工？",
        ],
    },
    IndustryProfile {
        id: "analyst",
        name: "数据分析师",
        dimensions: ["统计学基础", "建模能力", "业务洞察", "数据可视化", "SQL/Python", "决策支持"],
        expert_mode_name: "商业智能与决策驱动版",
        expert_strategy: "强调从数据中发现机会、归因分析、预测模型精准度、对战略决策的直接支撑。",
        data_placeholders: &["[预测准确率达到 X%]", "[发现潜在营收机会 Y万]", "[报表自动化节约 Z小时/周]"],
        roast_openers: &[
            "你只是个人肉取数机吗？我只看到了数字，没看到观点 (Insights)。",
            "这图表选得比我的午餐还随便。",
            "SQL 写得 6 有什么用，你的业务理解在哪里？",
        ],
    },
    IndustryProfile {
        id: "marketing",
        name: "市场/运营",
        dimensions: ["获客能力", "内容创意", "活动策划", "数据复盘", "渠道管理", "品牌建设"],
        expert_mode_name: "增长黑客与品牌操盘版",
        expert_strategy: "强调低成本获客、漏斗转化优化、私域流量运营、品牌声量引爆。",
        data_placeholders: &["[ROI 达到 1:X]", "[获客成本 (CAC) 降低 Y%]", "[全网曝光量 Z万+]", "[GMV 增长 W%]"],
        roast_openers: &[
            "全是自嗨型的文案，我看不到任何转化逻辑。",
            "这简历像是在烧老板的钱，完全没有 ROI 意识。",
            "做了那么多活动，效果呢？数据呢？",
        ],
    },
    IndustryProfile {
        id: "sales",
        name: "销售",
        dimensions: ["客户开发", "谈判技巧", "业绩达成", "渠道拓展", "客户维系", "销售管理"],
        expert_mode_name: "销冠策略与大客攻坚版",
        expert_strategy: "强调 KA 大客户攻单、销售漏斗管理、超额完成率、年度复合增长。",
        data_placeholders: &["[业绩达成率 X%]", "[年度销售额 Y万]", "[签约行业头部客户 Z家]", "[回款率 W%]"],
        roast_openers: &[
            "你在写简历还是在写小说？我要看数字，不是看过程。",
            "连业绩目标都没写，你打算进去养老吗？",
            "这简历像在写工作汇报，不是在证明你能卖货。",
        ],
    },
    IndustryProfile {
        id: "hr",
        name: "人力资源",
        dimensions: ["招聘配置", "组织发展", "薪酬绩效", "员工关系", "企业文化", "流程合规"],
        expert_mode_name: "组织效能与人才战略版",
        expert_strategy: "强调 OD（组织发展）、人才梯队建设、人效提升、合规风险控制。",
        data_placeholders: &["[招聘周期缩短 X天]", "[员工满意度提升 Y%]", "[核心人才流失率降低 Z%]", "[人效提升 W%]"],
        roast_openers: &[
            "你看起来像个只会发通知的行政，而不是懂业务的 HRBP。",
            "我看不到你对组织效率的任何贡献。",
            "招了多少人？留存率多少？成本多少？数据呢？",
        ],
    },
    IndustryProfile {
        id: "accountant",
        name: "会计/财务",
        dimensions: ["财务分析", "风险控制", "税务筹划", "合规准则", "资金管理", "报表效率"],
        expert_mode_name: "CFO 视角与财务战略版",
        expert_strategy: "强调业财融合、现金流优化、审计合规率、税务风险规避及对经营决策的数据支撑。",
        data_placeholders: &["[税务成本节约 X万]", "[月结耗时缩短 Y天]", "[审计一次通过率 100%]", "[资金周转率提升 Z%]"],
        roast_openers: &[
            "你只是个记流水账的算盘吗？我只看到了发票，没看到财务分析。",
            "我看不到任何风险管控意识，这种简历去大厂第一轮就会被财务总监毙掉。",
            "除了记账还会什么？业财融合在哪里？",
            "财务报表做得规规矩矩，但对经营决策有什么支撑？",
        ],
    },
];
