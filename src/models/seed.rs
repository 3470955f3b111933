//! Static seed catalog and the fixed reference origin
//!
//! Seed identifiers are stable strings; they never collide with the
//! `{source}-{millis}-{index}` identifiers issued for discovered entries.

use super::location::Category::{Craft, Geographic, Heritage, Origin};
use super::location::{Category, Coordinates, Location};

/// Name of the reference origin every distance is measured from
pub const ORIGIN_NAME: &str = "上海";

/// Reference origin (Shanghai)
pub const ORIGIN: Coordinates = Coordinates::new(31.2304, 121.4737);

struct SeedRow {
    id: &'static str,
    name: &'static str,
    lat: f64,
    lng: f64,
    category: Category,
    title: &'static str,
    description: &'static str,
    distance_km: f64,
    drive_hours: f64,
    toll_cny: f64,
    drive_friendly: bool,
    tags: &'static [&'static str],
}

#[allow(clippy::too_many_arguments)]
const fn row(
    id: &'static str,
    name: &'static str,
    lat: f64,
    lng: f64,
    category: Category,
    title: &'static str,
    description: &'static str,
    distance_km: f64,
    drive_hours: f64,
    toll_cny: f64,
    drive_friendly: bool,
    tags: &'static [&'static str],
) -> SeedRow {
    SeedRow {
        id,
        name,
        lat,
        lng,
        category,
        title,
        description,
        distance_km,
        drive_hours,
        toll_cny,
        drive_friendly,
        tags,
    }
}

const SEED: &[SeedRow] = &[
    row("cicheng", "宁波慈城", 29.985, 121.448, Heritage, "非遗手工艺古镇", "螺钿镶嵌、木雕、刺绣聚集地。", 210.0, 3.0, 100.0, true, &["螺钿", "木雕"]),
    row("kaili", "贵州凯里", 26.583, 107.977, Heritage, "苗族非遗之都", "苗族亮布、蜡染、银饰的中心。", 1700.0, 19.0, 900.0, false, &["蜡染", "银饰"]),
    row("suzhou", "苏州", 31.298, 120.585, Heritage, "苏绣与园林", "苏绣发源地，拥有精湛的丝绸技艺。", 100.0, 1.5, 45.0, true, &["苏绣", "丝绸"]),
    row("nanjing", "南京", 32.060, 118.796, Heritage, "云锦织造", "寸锦寸金的云锦工艺，皇室御用。", 300.0, 3.5, 135.0, true, &["云锦", "历史"]),
    row("yangzhou", "扬州", 32.394, 119.412, Heritage, "漆器与玉雕", "扬州漆器工艺精湛，玉雕工巧。", 280.0, 3.2, 120.0, true, &["漆器", "玉雕"]),
    row("weifang", "山东潍坊", 36.707, 119.161, Heritage, "风筝之都", "世界风筝发源地，木版年画亦出名。", 850.0, 9.5, 400.0, false, &["风筝", "年画"]),
    row("quanzhou", "福建泉州", 24.874, 118.675, Heritage, "海上丝路起点", "提线木偶戏，南音，花灯。", 980.0, 11.0, 480.0, false, &["木偶戏", "南音"]),
    row("huizhou", "安徽黄山", 29.714, 118.337, Heritage, "徽州三雕", "木雕、石雕、砖雕工艺的巅峰。", 400.0, 4.5, 190.0, true, &["徽雕", "墨"]),
    row("foshan", "广东佛山", 23.021, 113.121, Heritage, "醒狮与武术", "南狮发源地，功夫之城。", 1500.0, 17.0, 750.0, false, &["醒狮", "陶瓷"]),
    row("chengdu", "四川成都", 30.572, 104.066, Heritage, "蜀锦与漆器", "四大名锦之一蜀锦，成都漆艺。", 1950.0, 22.0, 1000.0, false, &["蜀锦", "竹编"]),
    row("zhuji", "绍兴诸暨", 29.718, 120.236, Origin, "华东国际珠宝城", "最大淡水珍珠市场，开蚌体验。", 180.0, 2.5, 85.0, true, &["珍珠"]),
    row("baoshan", "云南保山", 25.112, 99.162, Origin, "南红玛瑙之都", "顶级南红原产地，宝石猎人必去。", 2650.0, 30.0, 1400.0, false, &["南红", "宝石"]),
    row("hotan", "新疆和田", 37.114, 79.922, Origin, "和田玉源头", "羊脂白玉的原产地，玉龙喀什河。", 4200.0, 48.0, 2000.0, false, &["和田玉"]),
    row("wuyishan", "福建武夷山", 27.755, 118.035, Origin, "大红袍祖庭", "岩茶核心产区，茶文化深厚。", 700.0, 8.0, 350.0, false, &["茶叶", "岩茶"]),
    row("donghai", "江苏东海", 34.542, 118.763, Origin, "世界水晶之都", "天然水晶储量与交易量极大。", 500.0, 5.5, 230.0, true, &["水晶"]),
    row("qimen", "安徽祁门", 29.855, 117.717, Origin, "红茶皇后", "祁门红茶原产地，香气高扬。", 450.0, 5.0, 210.0, true, &["红茶"]),
    row("maotai", "贵州茅台镇", 27.854, 106.381, Origin, "酱香酒魂", "国酒茅台产地，酒香弥漫全镇。", 1800.0, 20.0, 950.0, false, &["白酒"]),
    row("fuzhou_jx", "江西抚州", 27.947, 116.357, Origin, "南丰蜜桔", "中国蜜桔之乡，不仅有桔还有才子文化。", 700.0, 8.0, 320.0, false, &["蜜桔"]),
    row("ruili", "云南瑞丽", 24.012, 97.851, Origin, "翡翠集散地", "中缅边境最大的翡翠交易市场。", 2800.0, 32.0, 1500.0, false, &["翡翠"]),
    row("shouguang", "山东寿光", 36.881, 118.736, Origin, "蔬菜之都", "中国蔬菜博览会，现代农业奇观。", 800.0, 9.0, 380.0, false, &["农业"]),
    row("qinghaihu", "青海湖", 36.620, 100.220, Geographic, "高原蓝宝石", "最大咸水湖与盐湖，天空之镜。", 2300.0, 26.0, 1100.0, false, &["盐湖", "高原"]),
    row("zhangye", "甘肃张掖", 38.925, 100.449, Geographic, "七彩丹霞", "上帝打翻的调色盘，丹霞地貌。", 2500.0, 28.0, 1250.0, false, &["丹霞"]),
    row("songyang", "浙江松阳", 28.450, 119.480, Geographic, "江南最后的秘境", "山地古村落，云雾缭绕。", 400.0, 5.0, 190.0, true, &["古村", "秘境"]),
    row("changbaishan", "吉林长白山", 42.006, 128.057, Geographic, "天池圣境", "休眠火山，高山湖泊，原始森林。", 1800.0, 20.0, 850.0, false, &["火山", "天池"]),
    row("guilin", "广西桂林", 25.273, 110.290, Geographic, "喀斯特山水", "漓江山水甲天下，独特岩溶地貌。", 1500.0, 16.0, 700.0, false, &["喀斯特", "山水"]),
    row("huanglong", "四川黄龙", 32.753, 103.823, Geographic, "钙化彩池", "人间瑶池，五彩斑斓的钙化池。", 2100.0, 24.0, 1100.0, false, &["钙化池", "雪山"]),
    row("panjin", "辽宁盘锦", 41.134, 122.067, Geographic, "红海滩", "碱蓬草编织的红色海岸线。", 1600.0, 17.0, 750.0, false, &["湿地", "红海滩"]),
    row("ench", "湖北恩施", 30.295, 109.479, Geographic, "大峡谷", "媲美科罗拉多的大峡谷，绝壁栈道。", 1100.0, 13.0, 550.0, false, &["峡谷"]),
    row("wuyuan", "江西婺源", 29.283, 117.861, Geographic, "最美乡村", "梯田油菜花，徽派建筑与自然的融合。", 480.0, 5.5, 230.0, true, &["梯田", "花海"]),
    row("dunhuang", "甘肃敦煌", 40.142, 94.661, Geographic, "鸣沙山月牙泉", "沙漠与清泉共存的奇迹。", 2800.0, 31.0, 1400.0, false, &["沙漠", "绿洲"]),
    row("jingdezhen", "江西景德镇", 29.293, 117.207, Craft, "千年瓷都", "世界陶瓷中心，市集文化活跃。", 450.0, 5.5, 220.0, true, &["陶瓷"]),
    row("yixing", "无锡宜兴", 31.362, 119.822, Craft, "紫砂壶之都", "紫砂唯一原产地，大师云集。", 160.0, 2.0, 75.0, true, &["紫砂"]),
    row("longquan", "浙江龙泉", 28.073, 119.141, Craft, "青瓷与宝剑", "龙泉青瓷温润如玉，宝剑锋利。", 480.0, 5.5, 225.0, true, &["青瓷", "宝剑"]),
    row("dehua", "福建德化", 25.492, 118.243, Craft, "中国白", "德化白瓷，如脂似玉，雕塑精美。", 850.0, 10.0, 420.0, false, &["白瓷"]),
    row("nantong", "江苏南通", 32.008, 120.894, Craft, "蓝印花布", "传统染织技艺，朴素大方。", 120.0, 1.5, 50.0, true, &["印染"]),
    row("pingyao", "山西平遥", 37.189, 112.176, Craft, "推光漆器", "中国四大漆器之一，手掌推光。", 1100.0, 12.0, 550.0, false, &["漆器", "古城"]),
    row("liuyang", "湖南浏阳", 28.140, 113.626, Craft, "花炮之乡", "全球最大的烟花生产基地。", 1100.0, 12.0, 540.0, false, &["烟花"]),
    row("zigong", "四川自贡", 29.339, 104.778, Craft, "彩灯与井盐", "天下第一灯，千年盐都。", 1850.0, 21.0, 920.0, false, &["彩灯", "井盐"]),
    row("shantou", "广东汕头", 23.366, 116.682, Craft, "潮绣与抽纱", "绣工精细，富丽堂皇。", 1350.0, 15.0, 650.0, false, &["潮绣"]),
    row("tengchong", "云南腾冲", 25.025, 98.490, Craft, "琥珀与翡翠", "著名的翡翠加工集散地，皮影戏。", 2750.0, 31.0, 1450.0, false, &["琥珀", "皮影"]),
];

/// Build the seed catalog in its display order
#[must_use]
pub fn seed_locations() -> Vec<Location> {
    SEED.iter()
        .map(|row| Location {
            id: row.id.to_string(),
            name: row.name.to_string(),
            category: row.category,
            coordinates: Coordinates::new(row.lat, row.lng),
            specialty_title: row.title.to_string(),
            specialty_description: row.description.to_string(),
            distance_from_shanghai_km: row.distance_km,
            drive_time_hours: row.drive_hours,
            toll_cost_cny: row.toll_cny,
            self_driving_friendly: row.drive_friendly,
            tags: row.tags.iter().map(|tag| (*tag).to_string()).collect(),
        })
        .collect()
}
