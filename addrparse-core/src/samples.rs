//! Textos de demonstração exibidos na interface web (`GET /samples`).

/// Pares `(rótulo, texto)` cobrindo os formatos mais comuns de colagem.
pub fn demo_texts() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "Cartão de visita",
            "บริษัท ทดสอบ จำกัด (สำนักงานใหญ่) 123/45 หมู่ 6 ซอยสุขใจ ถนนสุขุมวิท ตำบลบางนา อำเภอบางนา จังหวัดกรุงเทพมหานคร 10260 โทร 02-123-4567 test@example.com",
        ),
        (
            "Mensagem de chat",
            "คุณสมชาย ใจดี\n88/8 ม.2 ต.บางพูด อ.ปากเกร็ด จ.นนทบุรี 11120\nเบอร์ 081-234-5678\nไลน์: somchai.j",
        ),
        (
            "Nota fiscal",
            "บริษัท ปูนซิเมนต์ไทย จำกัด (มหาชน) สาขาที่ 00002\nเลขประจำตัวผู้เสียภาษี 0107537000114\nเลขที่ 1 ถนนปูนซิเมนต์ไทย แขวงบางซื่อ เขตบางซื่อ กรุงเทพฯ 10800",
        ),
        (
            "Cartão em inglês",
            "Acme Trading Co., Ltd. (Head Office)\n99/1 Moo 3, Soi 5, Sukhumvit Rd., Bangkok 10110\nTel: +66 81 234 5678\nE-mail: sales@acme.co.th",
        ),
        (
            "Loja com mapa",
            "ร้านกาแฟบ้านสวน 45/2 หมู่บ้านสุขใจ ซอยร่วมฤดี ถนนวิทยุ https://maps.app.goo.gl/AbCdEf123 โทร. 02-987-6543",
        ),
        ("Só o nome", "ชื่อ: สมหญิง รักเรียน"),
    ]
}
