//! Human-readable descriptions of well-known resource types.


use crate::os_type::OsType;


/// Returns a short description of the resource type, or `None` if the type is not a well-known one.
pub fn type_name(os_type: OsType) -> Option<&'static str> {
    TYPE_NAMES.binary_search_by_key(&os_type, |(t, _)| *t)
        .ok()
        .map(|index| TYPE_NAMES[index].1)
}

/// Like [`type_name`], for a type given as a four-character string.
///
/// Returns `None` if the string is not exactly four ASCII characters long.
pub fn type_name_for_str(os_type: &str) -> Option<&'static str> {
    if !os_type.is_ascii() {
        return None;
    }
    let bytes: [u8; 4] = os_type.as_bytes().try_into().ok()?;
    type_name(OsType::from(bytes))
}


// sorted by type code
static TYPE_NAMES: &[(OsType, &str)] = &[
    (OsType::from_bytes(b"ADBS"), "Apple Desktop Bus service routine"),
    (OsType::from_bytes(b"ALRT"), "Alert template"),
    (OsType::from_bytes(b"APPL"), "Application list (Desktop file)"),
    (OsType::from_bytes(b"BNDL"), "Bundle linking FREF and ICN# to provide correct icon on Desktop"),
    (OsType::from_bytes(b"BNDN"), "Data configured in big-endian form"),
    (OsType::from_bytes(b"BOOL"), "Boolean word"),
    (OsType::from_bytes(b"CACH"), "RAM cache control code"),
    (OsType::from_bytes(b"CDEF"), "Control definition"),
    (OsType::from_bytes(b"CHAR"), "ASCII character"),
    (OsType::from_bytes(b"CLUT"), "Color look-up table"),
    (OsType::from_bytes(b"CMDO"), "MPW or A/UX Comando data"),
    (OsType::from_bytes(b"CMNU"), "Menu with command ID numbers"),
    (OsType::from_bytes(b"CNTL"), "Control template"),
    (OsType::from_bytes(b"CODE"), "Application code segment"),
    (OsType::from_bytes(b"COLR"), "QuickDraw RGB colour template"),
    (OsType::from_bytes(b"CTY#"), "City list"),
    (OsType::from_bytes(b"CURS"), "Cursor, black & white with mask"),
    (OsType::from_bytes(b"DATA"), "Data"),
    (OsType::from_bytes(b"DATE"), "System date and time"),
    (OsType::from_bytes(b"DICL"), "Used by MacWorkstation"),
    (OsType::from_bytes(b"DITL"), "Dialog item list"),
    (OsType::from_bytes(b"DLOG"), "Dialog template"),
    (OsType::from_bytes(b"DRVR"), "Driver"),
    (OsType::from_bytes(b"DSAT"), "Default startup alert table"),
    (OsType::from_bytes(b"FBTN"), "MiniFinder button"),
    (OsType::from_bytes(b"FCMT"), "Finder comment"),
    (OsType::from_bytes(b"FDIR"), "MiniFinder button directory ID"),
    (OsType::from_bytes(b"FKEY"), "Function Key code"),
    (OsType::from_bytes(b"FLTR"), "Declare Filtered Template with comment"),
    (OsType::from_bytes(b"FMTR"), "Format record"),
    (OsType::from_bytes(b"FOBJ"), "Folder information"),
    (OsType::from_bytes(b"FOND"), "Font family descriptor"),
    (OsType::from_bytes(b"FONT"), "Font description, bitmap"),
    (OsType::from_bytes(b"FREF"), "File reference for BNDL used to identify correct icon"),
    (OsType::from_bytes(b"FRSV"), "ROM font resources"),
    (OsType::from_bytes(b"FWID"), "Font width table"),
    (OsType::from_bytes(b"GNRL"), "NBP timeout and retry info for AppleTalk"),
    (OsType::from_bytes(b"ICN#"), "Large Desktop icon, black & white with mask"),
    (OsType::from_bytes(b"ICON"), "Large application icon, black & white"),
    (OsType::from_bytes(b"INIT"), "Startup resource (extension, control panel or System file)"),
    (OsType::from_bytes(b"INTL"), "International formatting information"),
    (OsType::from_bytes(b"ITL1"), "International long date format"),
    (OsType::from_bytes(b"KCAP"), "Physical keyboard layout used by Keycaps DA"),
    (OsType::from_bytes(b"KCHR"), "Keyboard character software ASCII mapping"),
    (OsType::from_bytes(b"KEYC"), "Old keyboard layout"),
    (OsType::from_bytes(b"KMAP"), "Hardware keyboard mapping"),
    (OsType::from_bytes(b"KSWP"), "Keyboard script swapping table"),
    (OsType::from_bytes(b"LAYO"), "Layout resource"),
    (OsType::from_bytes(b"LDEF"), "List definition"),
    (OsType::from_bytes(b"LNDN"), "Data in little-endian format"),
    (OsType::from_bytes(b"LNGC"), "Mac OS language code"),
    (OsType::from_bytes(b"MACS"), "Version number for System and Finder files"),
    (OsType::from_bytes(b"MBAR"), "Menu bar, contains set of MENU IDs"),
    (OsType::from_bytes(b"MBDF"), "Default menu definition"),
    (OsType::from_bytes(b"MDAT"), "Modification date and time"),
    (OsType::from_bytes(b"MDEF"), "Menu definition"),
    (OsType::from_bytes(b"MENU"), "Menu contents & style"),
    (OsType::from_bytes(b"MooV"), "Movie"),
    (OsType::from_bytes(b"NBPC"), "AppleTalk NBP configuration"),
    (OsType::from_bytes(b"NFNT"), "New Font Numbering Table bitmap font, indexed via Font & Style menus"),
    (OsType::from_bytes(b"PACK"), "High-level software packages"),
    (OsType::from_bytes(b"PAPA"), "Printer name, type and zone"),
    (OsType::from_bytes(b"PAT "), "Black & white QuickDraw pattern, 8 by 8 pixels"),
    (OsType::from_bytes(b"PAT#"), "Black & white QuickDraw pattern list"),
    (OsType::from_bytes(b"PDEF"), "Printer definition"),
    (OsType::from_bytes(b"PICT"), "Picture"),
    (OsType::from_bytes(b"PNT "), "QuickDraw Point"),
    (OsType::from_bytes(b"POST"), "PostScript data"),
    (OsType::from_bytes(b"PRC0"), "Default printer page setup defaults"),
    (OsType::from_bytes(b"PRC3"), "Print record"),
    (OsType::from_bytes(b"PREC"), "Printer driver's private data"),
    (OsType::from_bytes(b"PREF"), "Preferences"),
    (OsType::from_bytes(b"PSAP"), "String"),
    (OsType::from_bytes(b"PTCH"), "ROM patch code"),
    (OsType::from_bytes(b"RECT"), "QuickDraw rectangle"),
    (OsType::from_bytes(b"RGNC"), "Mac OS System Region Code"),
    (OsType::from_bytes(b"ROv#"), "List of ROM resource overrides"),
    (OsType::from_bytes(b"RSID"), "Signed resource ID integer"),
    (OsType::from_bytes(b"SCPC"), "MacOS system script code"),
    (OsType::from_bytes(b"SERD"), "RAMSerial Driver"),
    (OsType::from_bytes(b"SICN"), "Small application icon, black & white"),
    (OsType::from_bytes(b"SIZE"), "Finder size information"),
    (OsType::from_bytes(b"STR "), "String in Pascal format"),
    (OsType::from_bytes(b"STR#"), "String list in Pascal format"),
    (OsType::from_bytes(b"TEXT"), "Unlabelled text string"),
    (OsType::from_bytes(b"TMPL"), "ResEdit template"),
    (OsType::from_bytes(b"TNAM"), "Type name"),
    (OsType::from_bytes(b"WDEF"), "Window definition"),
    (OsType::from_bytes(b"WIND"), "Window template"),
    (OsType::from_bytes(b"XCMD"), "HyperCard external command"),
    (OsType::from_bytes(b"XFCN"), "HyperCard external function"),
    (OsType::from_bytes(b"actb"), "Alert colour table"),
    (OsType::from_bytes(b"acur"), "Animated cursor"),
    (OsType::from_bytes(b"alis"), "Alias"),
    (OsType::from_bytes(b"atpl"), "AppleTalk resource"),
    (OsType::from_bytes(b"blkx"), "UDIF block chunks"),
    (OsType::from_bytes(b"bmap"), "Bitmap graphic"),
    (OsType::from_bytes(b"boot"), "Copy of boot blocks"),
    (OsType::from_bytes(b"cctb"), "Control colour table"),
    (OsType::from_bytes(b"cdev"), "Control device code (control panel)"),
    (OsType::from_bytes(b"cfrg"), "Code fragment dictionary for PowerPC code"),
    (OsType::from_bytes(b"cicn"), "Large screen icon, colour"),
    (OsType::from_bytes(b"clut"), "Color look-up table"),
    (OsType::from_bytes(b"cmnu"), "MacApp temporary menu resource"),
    (OsType::from_bytes(b"crsr"), "Cursor, colour"),
    (OsType::from_bytes(b"ctab"), "Cache table containing list of possible cache sizes"),
    (OsType::from_bytes(b"dctb"), "Dialog colour table"),
    (OsType::from_bytes(b"errs"), "MacApp error string"),
    (OsType::from_bytes(b"fPRT"), "Print Catalogue defaults for Finder"),
    (OsType::from_bytes(b"fctb"), "Font colour table"),
    (OsType::from_bytes(b"finf"), "Font information"),
    (OsType::from_bytes(b"fld#"), "Folder names list"),
    (OsType::from_bytes(b"fmnu"), "Finder menu"),
    (OsType::from_bytes(b"gama"), "Gamma table giving color correction for screen"),
    (OsType::from_bytes(b"hdlg"), "Balloon Help for dialog box items"),
    (OsType::from_bytes(b"hfdr"), "Balloon Help for application icon in Finder"),
    (OsType::from_bytes(b"hmnu"), "Balloon Help for menus in application"),
    (OsType::from_bytes(b"hovr"), "Balloon Help that overrides Finder help"),
    (OsType::from_bytes(b"hrct"), "Balloon Help for rectangles in windows"),
    (OsType::from_bytes(b"hwin"), "Bundles together the hrct and hdlg resources for a window"),
    (OsType::from_bytes(b"icl4"), "Large Desktop icon, 4-bit colour"),
    (OsType::from_bytes(b"icl8"), "Large Desktop icon, 8-bit colour"),
    (OsType::from_bytes(b"icmt"), "Installer comment"),
    (OsType::from_bytes(b"icns"), "Universal icon, all sizes"),
    (OsType::from_bytes(b"ics#"), "Small Desktop icon, black and white with mask"),
    (OsType::from_bytes(b"ics4"), "Small Desktop icon, 4-bit colour"),
    (OsType::from_bytes(b"ics8"), "Small Desktop icon, 8-bit colour"),
    (OsType::from_bytes(b"ictb"), "Dialog items colour table"),
    (OsType::from_bytes(b"inbb"), "Installer boot block"),
    (OsType::from_bytes(b"indm"), "Installer default map"),
    (OsType::from_bytes(b"infa"), "Installer file atom"),
    (OsType::from_bytes(b"infs"), "Installer file spec"),
    (OsType::from_bytes(b"inpk"), "Installer package"),
    (OsType::from_bytes(b"inra"), "Installer resource atom"),
    (OsType::from_bytes(b"insc"), "Installer script"),
    (OsType::from_bytes(b"itl0"), "International date and time format, now obsolete (INTL ID=0)"),
    (OsType::from_bytes(b"itl1"), "International names of days and months (INTL ID=1)"),
    (OsType::from_bytes(b"itl2"), "International Utilities string comparison hooks"),
    (OsType::from_bytes(b"itl4"), "International Tokenise tables & Localisation code"),
    (OsType::from_bytes(b"itl5"), "International Character Set encoding"),
    (OsType::from_bytes(b"itlb"), "International Utilities Package Script bundles"),
    (OsType::from_bytes(b"itlc"), "International Script Manager configuration"),
    (OsType::from_bytes(b"itlk"), "International exception dictionary for KCHR"),
    (OsType::from_bytes(b"itlm"), "Sorting order for Script, language and region"),
    (OsType::from_bytes(b"kind"), "File description"),
    (OsType::from_bytes(b"kscn"), "Keyboard and script system icon"),
    (OsType::from_bytes(b"lmem"), "Finder low memory globals"),
    (OsType::from_bytes(b"mach"), "Matches machine to CDEV control panel (control panel)"),
    (OsType::from_bytes(b"mcky"), "Mouse tracking speed presets for Mouse control panel"),
    (OsType::from_bytes(b"mcod"), "MacroMaker information"),
    (OsType::from_bytes(b"mctb"), "Menu colour table"),
    (OsType::from_bytes(b"mdct"), "MacroMaker information"),
    (OsType::from_bytes(b"mem!"), "MacApp memory usage"),
    (OsType::from_bytes(b"minf"), "Macro info for MacroMaker"),
    (OsType::from_bytes(b"mitq"), "Internal memory needs for colour Make Inverse Table"),
    (OsType::from_bytes(b"mntb"), "MacApp menu table, relating command number to menu item"),
    (OsType::from_bytes(b"mppc"), "MPP configuration resource"),
    (OsType::from_bytes(b"mstr"), "Finder substitute file storing Open and Quit strings"),
    (OsType::from_bytes(b"ncts"), "List of constants"),
    (OsType::from_bytes(b"nrct"), "Rectangle position list"),
    (OsType::from_bytes(b"open"), "Openable file types"),
    (OsType::from_bytes(b"plst"), "UDIF partition list"),
    (OsType::from_bytes(b"pltt"), "Colour palette"),
    (OsType::from_bytes(b"pnot"), "Preview notification"),
    (OsType::from_bytes(b"ppat"), "Colour pixel pattern"),
    (OsType::from_bytes(b"ppcc"), "PPC browser communications"),
    (OsType::from_bytes(b"ppt#"), "List of ppat patterns"),
    (OsType::from_bytes(b"qrsc"), "Query resource used in Sytem 7.0"),
    (OsType::from_bytes(b"resl"), "Resident MacApp segments"),
    (OsType::from_bytes(b"scrn"), "Screen configuration for Monitors control panel"),
    (OsType::from_bytes(b"seg!"), "MacApp memory management"),
    (OsType::from_bytes(b"sfn#"), "System Font list"),
    (OsType::from_bytes(b"sfnt"), "Spline or scalable font"),
    (OsType::from_bytes(b"snd "), "Sound"),
    (OsType::from_bytes(b"snth"), "Sound synthesiser resource"),
    (OsType::from_bytes(b"styl"), "Style information for text used by TextEdit"),
    (OsType::from_bytes(b"sysz"), "System Heap request"),
    (OsType::from_bytes(b"tlst"), "Title list"),
    (OsType::from_bytes(b"vers"), "Version"),
    (OsType::from_bytes(b"view"), "MacApp view resource"),
    (OsType::from_bytes(b"wctb"), "Window colour table"),
    (OsType::from_bytes(b"wstr"), "String used by qrsc"),
];
