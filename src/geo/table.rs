//! Static reference data for Tunisian postal codes.
//!
//! One row per assigned code: (code, region, location). Grouped by
//! governorate; the table is indexed into a map at startup by
//! [`super::PostalCodeTable::load`].

pub(super) const ENTRIES: &[(&str, &str, &str)] = &[
    // Ariana
    ("2035", "Ariana", "Tunis Carthage"),
    ("2001", "Ariana", "Cité ennasr ariana"),
    ("2027", "Ariana", "Borj baccouch"),
    ("2036", "Ariana", "Soukra"),
    ("2080", "Ariana", "Ariana"),
    ("2002", "Ariana", "Ariana geant"),
    ("2091", "Ariana", "Menzah 6"),
    ("2083", "Ariana", "Cité la gazelle"),

    // Beja
    ("9070", "Beja", "Mjaz elbab"),
    ("9040", "Beja", "Teboursouk"),
    ("9000", "Beja", "Beja"),
    ("9032", "Beja", "Dougga"),

    // Ben arous
    ("2098", "Ben arous", "Rades medina"),
    ("1145", "Ben arous", "Mhamdia"),
    ("2050", "Ben arous", "Hammam lif"),
    ("2040", "Ben arous", "Rades"),
    ("2034", "Ben arous", "Ezzahra"),
    ("2013", "Ben arous", "Ben arous"),
    ("2044", "Ben arous", "Errisala"),
    ("2065", "Ben arous", "Ezzahra el habib"),
    ("2063", "Ben arous", "Nouvelle médina"),
    ("2074", "Ben arous", "Mourouj 1"),
    ("2068", "Ben arous", "Mourouj 3"),
    ("2014", "Ben arous", "Megrine riadh"),
    ("2090", "Ben arous", "Mornag"),
    ("2033", "Ben arous", "Megrine"),

    // Bizerte
    ("7000", "Bizerte", "Bizerte"),
    ("7070", "Bizerte", "Ras djebel"),
    ("7061", "Bizerte", "Bizerte bab mater"),
    ("7050", "Bizerte", "Menzel bourguiba"),
    ("7072", "Bizerte", "MZL bourguiba ennajah"),
    ("7030", "Bizerte", "Mateur"),
    ("7080", "Bizerte", "Menzel jemil"),

    // Gabes
    ("6001", "Gabes", "Gabes hached"),
    ("6000", "Gabes", "Gabes B-bhar"),
    ("6033", "Gabes", "Cite elamel"),
    ("6020", "Gabes", "El hamma"),
    ("6080", "Gabes", "Mareth"),

    // Gafsa
    ("2100", "Gafsa", "Gafsa"),
    ("2123", "Gafsa", "Gafsa cité ennour"),
    ("2117", "Gafsa", "Gafsa intilaka"),
    ("2130", "Gafsa", "Metlaoui"),
    ("2180", "Gafsa", "El guettar"),
    ("2120", "Gafsa", "Errdayef"),
    ("2111", "Gafsa", "Gafsa gare"),

    // Jendouba
    ("8130", "Jendouba", "Ain drahem"),
    ("8170", "Jendouba", "Bousalem"),
    ("8110", "Jendouba", "Tabarka"),
    ("8100", "Jendouba", "Jendouba"),
    ("8160", "Jendouba", "Ghardimaou"),

    // Kairouan
    ("3180", "Kairouan", "Bouhajla"),
    ("3140", "Kairouan", "Kaiouran okba"),
    ("3131", "Kairouan", "Kaiouran sud"),
    ("3100", "Kairouan", "Kairouan"),
    ("3120", "Kairouan", "Oueslatia"),
    ("3160", "Kairouan", "Hajeb laayoune"),
    ("3129", "Kairouan", "Cité hajjem"),
    ("3116", "Kairouan", "Cherarda"),
    ("3182", "Kairouan", "Cite ennasr kairouan"),
    ("3199", "Kairouan", "Cite iben jazzar"),
    ("3130", "Kairouan", "Haffouz"),

    // Kasserine
    ("1270", "Kasserine", "Sbiba"),
    ("1240", "Kasserine", "Feryana"),
    ("1210", "Kasserine", "Tela"),
    ("1200", "Kasserine", "Kasserine"),
    ("1250", "Kasserine", "Sbeitla"),

    // Kebili
    ("4260", "Kebili", "Douz"),
    ("4200", "Kebili", "Kebili"),
    ("4280", "Kebili", "Kebili biez"),
    ("4230", "Kebili", "Souk lahad"),

    // Kef
    ("7170", "Kef", "Dahmani"),
    ("7100", "Kef", "Kef"),
    ("7150", "Kef", "Tejerouin"),
    ("7117", "Kef", "Kef ouest"),

    // Mahdia
    ("5131", "Mahdia", "Hekaima"),
    ("5150", "Mahdia", "Mahdia republique"),
    ("5170", "Mahdia", "Chebba"),
    ("5100", "Mahdia", "Mahdia"),
    ("5111", "Mahdia", "Mahdia hiboun"),
    ("5180", "Mahdia", "Ksour essef"),
    ("5140", "Mahdia", "Souassi"),
    ("5160", "Mahdia", "El jamm"),

    // Mannouba
    ("1130", "Mannouba", "Tebourba"),
    ("1110", "Mannouba", "Mornaguia"),
    ("2011", "Mannouba", "Denden"),
    ("2010", "Mannouba", "Mannouba"),

    // Medenine
    ("4175", "Medenine", "El may"),
    ("4135", "Medenine", "Ajim"),
    ("4144", "Medenine", "Mouensa"),
    ("4116", "Medenine", "Midoun"),
    ("4170", "Medenine", "Zarzis"),
    ("4100", "Medenine", "Medenine"),
    ("4180", "Medenine", "Jerba"),
    ("4120", "Medenine", "Jerba aeroport"),
    ("4145", "Medenine", "Cedouikech"),
    ("4176", "Medenine", "Akrou"),
    ("4160", "Medenine", "Benguerden"),
    ("4173", "Medenine", "Souihel"),

    // Monastir
    ("5070", "Monastir", "Ksar hellal"),
    ("5050", "Monastir", "Moknine"),
    ("5051", "Monastir", "Moknine jadida"),
    ("5020", "Monastir", "Jammel"),
    ("5000", "Monastir", "Monastir"),
    ("5016", "Monastir", "Ksar hellal riadh"),
    ("5060", "Monastir", "Monastir republique"),
    ("5080", "Monastir", "Teboulba"),

    // Nabeul
    ("8090", "Nabeul", "Kelibia"),
    ("8057", "Nabeul", "Yasmine hammamet"),
    ("8062", "Nabeul", "Nabeul thameur"),
    ("8060", "Nabeul", "Beni khiar"),
    ("8070", "Nabeul", "Korba"),
    ("8058", "Nabeul", "Mrezga"),
    ("8020", "Nabeul", "Soliman"),
    ("8030", "Nabeul", "Grombalia"),
    ("8011", "Nabeul", "Dar chaaban fehri"),
    ("8050", "Nabeul", "Hammamet"),
    ("8080", "Nabeul", "Manzel temim"),
    ("8000", "Nabeul", "Nabeul"),

    // Sfax
    ("3041", "Sfax", "Merkez chihya"),
    ("3031", "Sfax", "Merkez bouacida"),
    ("3052", "Sfax", "Cite el habib"),
    ("3062", "Sfax", "Sidi abbes"),
    ("3027", "Sfax", "Sfax jadida"),
    ("3051", "Sfax", "Merkez el alia"),
    ("3089", "Sfax", "Sfax 15 november"),
    ("3079", "Sfax", "Cite khayri"),
    ("3064", "Sfax", "Cite bahri"),
    ("3050", "Sfax", "Esskhira"),
    ("3000", "Sfax", "Sfax"),
    ("3070", "Sfax", "Karkena"),
    ("3069", "Sfax", "Sfax hached"),
    ("3099", "Sfax", "El boustene"),
    ("3083", "Sfax", "Tyna"),
    ("3030", "Sfax", "El aguereb"),
    ("3021", "Sfax", "Sakiet ezzit"),
    ("3080", "Sfax", "Jbeniyana"),
    ("3010", "Sfax", "El hencha"),
    ("3049", "Sfax", "Sfax maghreb arabe"),
    ("3060", "Sfax", "El mahres"),
    ("3011", "Sfax", "Sakiet eddaier"),

    // Sidi bouzid
    ("9120", "Sidi bouzid", "Benaoun"),
    ("9113", "Sidi bouzid", "Bir el hfay"),
    ("9110", "Sidi bouzid", "Jilma"),
    ("9140", "Sidi bouzid", "Meknasi"),
    ("9170", "Sidi bouzid", "Ergueb"),
    ("9100", "Sidi bouzid", "Sidi bouzid"),

    // Siliana
    ("6140", "Siliana", "Makthar"),
    ("6180", "Siliana", "Bouarada"),
    ("6100", "Siliana", "Siliana"),
    ("6150", "Siliana", "Rouhia"),

    // Sousse
    ("4030", "Sousse", "Enfidha"),
    ("4051", "Sousse", "Sousse khzema"),
    ("4011", "Sousse", "Hammam sousse"),
    ("4083", "Sousse", "Hammam sousse plage"),
    ("4060", "Sousse", "Kalla kebira"),
    ("4000", "Sousse", "Sousse"),
    ("4054", "Sousse", "Sahloul"),
    ("4059", "Sousse", "Sousse corniche"),
    ("4017", "Sousse", "Hammam sousse gharbi"),
    ("4070", "Sousse", "Msaken"),
    ("4061", "Sousse", "Sousse ibn khaldoun"),
    ("4023", "Sousse", "Sousse erriadh"),
    ("4089", "Sousse", "Kantaoui"),

    // Tataouine
    ("3234", "Tataouine", "Tataouine mahrajene"),
    ("3263", "Tataouine", "Tataouine ettahrir"),
    ("3220", "Tataouine", "Ghomrassen"),
    ("3200", "Tataouine", "Tataouine"),

    // Tozeur
    ("2240", "Tozeur", "Nefta"),
    ("2260", "Tozeur", "Dguech"),
    ("2200", "Tozeur", "Touzeur"),
    ("2210", "Tozeur", "Tozeur chokrasti"),

    // Tunis
    ("2051", "Tunis", "Zahrouni"),
    ("1082", "Tunis", "Cité mahragéne"),
    ("1095", "Tunis", "Sidi hassine"),
    ("1023", "Tunis", "Mohamed v"),
    ("1000", "Tunis", "Tunis RP"),
    ("1001", "Tunis", "Tunis republique"),
    ("1073", "Tunis", "Monplaisir"),
    ("2092", "Tunis", "El manar ||"),
    ("1053", "Tunis", "Berge du lac"),
    ("1069", "Tunis", "Tunis thameur"),
    ("2016", "Tunis", "Carthage"),
    ("2078", "Tunis", "Marsa safsaf"),
    ("1002", "Tunis", "Tunis belvedére"),
    ("2000", "Tunis", "Bardo"),
    ("1049", "Tunis", "Tunis hached"),
    ("2045", "Tunis", "Cite el mhiri"),
    ("1068", "Tunis", "Cite rommana"),
    ("2052", "Tunis", "Cite ezzouhour"),
    ("1008", "Tunis", "Bab menara"),
    ("1075", "Tunis", "Bab el khadhra"),
    ("2079", "Tunis", "Tunis aeroport"),
    ("1004", "Tunis", "El manzah"),
    ("1006", "Tunis", "Bab souika"),

    // Zaghouan
    ("1140", "Zaghouan", "Zaghouan el fahs"),
    ("1141", "Zaghouan", "Bir mcherga"),
    ("1100", "Zaghouan", "Zaghouan"),
    ("1111", "Zaghouan", "Jbel el west"),
    ("1152", "Zaghouan", "Hammam zriba"),
    ("1160", "Zaghouan", "Ennadhour"),
];
